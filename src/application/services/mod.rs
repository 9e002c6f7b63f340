//! Application services

pub mod discovery;
pub mod sets;

pub use discovery::DiscoveryService;
pub use sets::SearchSetService;
