//! navsets: automatic search-set creation for BIM model trees.
//!
//! Classifies a hierarchical model tree into named, filter-backed groups:
//! a discipline pass (naming-convention detection on root items) and a
//! clash-set pass (per-discipline grouping by a chosen element attribute).
//!
//! Layering follows domain → application → infrastructure → cli, with
//! errors wrapping layer by layer.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
