pub mod config;
pub mod graph;
pub mod identity;
pub mod keys;

pub use config::GroveConfig;
pub use graph::{GraphDb, GraphError, GraphStore, HierarchyIndexer, HierarchyStats};
pub use identity::{EntityKind, IdFormat, IdentityError, IdentityResolver};
