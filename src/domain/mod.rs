//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod classify;
pub mod entities;
pub mod error;
pub mod tree;

pub use classify::{classify, DISCIPLINE_PATTERNS};
pub use entities::{
    AttributeSelector, DisciplineTag, FilterSpec, GroupSpec, Wildcard, CLASH_SETS_FOLDER,
    DISCIPLINES_FOLDER,
};
pub use error::DomainError;
pub use tree::{ModelArena, ModelNode, NodeId, Property, PropertyCategory};
