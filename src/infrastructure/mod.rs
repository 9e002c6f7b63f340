//! Infrastructure layer: boundary trait implementations
//!
//! This layer implements the model-tree and group-store boundaries.

pub mod error;
pub mod model;
pub mod store;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use model::load_model;
pub use store::JsonGroupStore;
pub use traits::{evaluate_filter, GroupStore, InMemoryGroupStore, ModelTree};
