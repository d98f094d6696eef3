//! The query contract the hierarchy indexer requires of a graph backend.

use async_trait::async_trait;

use super::error::GraphError;
use super::models::{DirectoryRecord, FileStub, ProjectRecord};
use crate::keys;

/// Node labels this subsystem reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeLabel {
    Project,
    Directory,
    File,
    Entity,
}

impl NodeLabel {
    /// Store table backing this label.
    pub fn table(&self) -> &'static str {
        match self {
            NodeLabel::Project => "project",
            NodeLabel::Directory => "directory",
            NodeLabel::File => "file",
            NodeLabel::Entity => "entity",
        }
    }

    /// Label for a store table name, if it is one this subsystem knows.
    pub fn from_table(table: &str) -> Option<Self> {
        match table {
            "project" => Some(NodeLabel::Project),
            "directory" => Some(NodeLabel::Directory),
            "file" => Some(NodeLabel::File),
            "entity" => Some(NodeLabel::Entity),
            _ => None,
        }
    }
}

/// Typed reference to a node record: label plus record key.
///
/// Record-id formatting and escaping stay inside the store adapter; callers
/// never build id strings by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub label: NodeLabel,
    pub key: String,
}

impl NodeRef {
    /// Reference to a PROJECT node.
    pub fn project(project_name: &str) -> Self {
        Self {
            label: NodeLabel::Project,
            key: keys::project_key(project_name),
        }
    }

    /// Reference to a DIRECTORY node.
    pub fn directory(project_name: &str, path: &str) -> Self {
        Self {
            label: NodeLabel::Directory,
            key: keys::directory_key(project_name, path),
        }
    }

    /// Reference to a FILE node by its entity id.
    pub fn file(entity_id: &str) -> Self {
        Self {
            label: NodeLabel::File,
            key: entity_id.to_string(),
        }
    }

    /// Qualified name used as the endpoint identity when hashing
    /// relationship ids.
    pub fn qualified(&self) -> String {
        format!("{}:{}", self.label.table(), self.key)
    }
}

/// Match-or-create graph backend.
///
/// Every write converges: upserting the same key twice, concurrently or
/// sequentially, yields exactly one node or edge. The indexer's idempotence
/// under at-least-once redelivery is delegated to this contract.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Define tables and indexes (idempotent).
    async fn ensure_schema(&self) -> Result<(), GraphError>;

    /// Whether the schema has been initialized.
    async fn is_initialized(&self) -> Result<bool, GraphError>;

    /// Match-or-create the PROJECT node, overwriting root_path and the
    /// indexed-at timestamp.
    async fn upsert_project(&self, project: &ProjectRecord) -> Result<(), GraphError>;

    /// Match-or-create a DIRECTORY node.
    async fn upsert_directory(&self, directory: &DirectoryRecord) -> Result<(), GraphError>;

    /// Match-or-create a FILE node. Pre-existing records created by the
    /// upstream extraction pipeline keep their properties.
    async fn ensure_file(&self, file: &FileStub) -> Result<(), GraphError>;

    /// Match-or-create a CONTAINS edge between two existing nodes.
    async fn relate_contains(
        &self,
        from: &NodeRef,
        to: &NodeRef,
        rel_id: &str,
    ) -> Result<(), GraphError>;

    /// Targets of outgoing CONTAINS edges from a node.
    async fn children_of(&self, node: &NodeRef) -> Result<Vec<NodeRef>, GraphError>;

    /// Fetch a DIRECTORY record by project and path.
    async fn directory(
        &self,
        project_name: &str,
        path: &str,
    ) -> Result<Option<DirectoryRecord>, GraphError>;

    /// Fetch a PROJECT record by name.
    async fn project(&self, project_name: &str) -> Result<Option<ProjectRecord>, GraphError>;

    /// Total records under a label (diagnostic).
    async fn count_label(&self, label: NodeLabel) -> Result<usize, GraphError>;

    /// FILE entity ids that appear on more than one record (diagnostic;
    /// non-empty means an upsert invariant was violated).
    async fn duplicate_file_entity_ids(&self) -> Result<Vec<String>, GraphError>;
}
