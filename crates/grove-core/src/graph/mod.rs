//! Directory-hierarchy indexing into a labeled-property graph.
//!
//! This module maintains, per project, a tree of PROJECT → DIRECTORY → FILE
//! nodes connected by CONTAINS edges:
//!
//! - [`GraphStore`] - the upsert/relate/traverse contract the indexer
//!   requires of any graph backend
//! - [`GraphDb`] - SurrealDB embedded implementation (RocksDB persistence,
//!   in-memory engine for tests)
//! - [`HierarchyIndexer`] - turns a flat list of file paths into a
//!   consistent, duplicate-free, orphan-free tree
//!
//! All writes are match-or-create, so indexing runs are safe to repeat:
//! the upstream event pipeline only guarantees at-least-once delivery, and
//! re-running a whole indexing call is the retry strategy.
//!
//! # Example
//!
//! ```ignore
//! use grove_core::graph::{GraphDb, HierarchyIndexer};
//! use grove_core::identity::IdentityResolver;
//!
//! let db = Arc::new(GraphDb::open("./graph.db").await?);
//! db.ensure_schema().await?;
//!
//! let indexer = HierarchyIndexer::new(db, IdentityResolver::default());
//! let stats = indexer
//!     .index_hierarchy("my-project", "/repo", &paths, None)
//!     .await?;
//! ```

mod db;
mod error;
mod indexer;
pub mod models;
mod store;

pub use db::GraphDb;
pub use error::GraphError;
pub use indexer::HierarchyIndexer;
pub use models::{
    DirectoryRecord, FileStub, HierarchyStats, ProjectRecord, ProjectStatistics,
};
pub use store::{GraphStore, NodeLabel, NodeRef};
