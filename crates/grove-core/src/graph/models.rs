//! Record types for the hierarchy graph.
//!
//! One explicit struct per node label, mapped to store rows at the adapter
//! boundary.

use serde::{Deserialize, Serialize};
use surrealdb::sql::{Datetime, Thing};

/// A PROJECT node: the root of one indexed source tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    /// Project name, unique across the store.
    pub name: String,
    /// Filesystem root the project was indexed from.
    pub root_path: String,
    /// When the project was last indexed.
    pub indexed_at: Datetime,
}

impl ProjectRecord {
    /// Create a new project record.
    pub fn new(name: impl Into<String>, root_path: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            root_path: root_path.into(),
            indexed_at: Datetime::default(),
        }
    }
}

/// A DIRECTORY node: one unique ancestor directory of an indexed file.
///
/// Directories with no indexed files beneath them are never materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    /// Last path segment.
    pub name: String,
    /// Full path as supplied by the caller.
    pub path: String,
    /// Owning project name.
    pub project: String,
    /// Levels below the project root; a directory directly under the root
    /// has depth 0.
    pub depth: u32,
    /// When the directory was first indexed.
    pub created_at: Datetime,
    /// When the directory was last touched by an indexing run.
    pub updated_at: Datetime,
}

impl DirectoryRecord {
    /// Create a new directory record, deriving the name from the path.
    pub fn new(project: impl Into<String>, path: impl Into<String>, depth: u32) -> Self {
        let path = path.into();
        let name = std::path::Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&path)
            .to_string();

        Self {
            id: None,
            name,
            path,
            project: project.into(),
            depth,
            created_at: Datetime::default(),
            updated_at: Datetime::default(),
        }
    }
}

/// Minimal FILE node written when the upstream extraction pipeline has not
/// registered the file yet. Match-or-create: a pre-existing richer FILE
/// record is attached, not overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileStub {
    /// Unique identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Thing>,
    /// Content-addressed FILE entity id.
    pub entity_id: String,
    /// Full path as supplied by the caller.
    pub path: String,
    /// File name.
    pub name: String,
    /// Owning project name.
    pub project: String,
}

impl FileStub {
    /// Create a new file stub, deriving the name from the path.
    pub fn new(
        entity_id: impl Into<String>,
        path: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let name = std::path::Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&path)
            .to_string();

        Self {
            id: None,
            entity_id: entity_id.into(),
            path,
            name,
            project: project.into(),
        }
    }
}

/// Summary of one indexing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyStats {
    /// Projects touched (always 1 per call).
    pub projects: usize,
    /// Unique directories indexed.
    pub directories: usize,
    /// Files attached.
    pub files: usize,
    /// CONTAINS edges issued.
    pub relationships: usize,
}

/// Read-only aggregate over an already-indexed project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatistics {
    /// DIRECTORY nodes reachable from the project.
    pub directories: usize,
    /// FILE nodes reachable from the project.
    pub files: usize,
    /// All reachable nodes including the PROJECT node itself.
    pub total_nodes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_record_derives_name() {
        let dir = DirectoryRecord::new("proj", "/repo/src/utils", 1);
        assert_eq!(dir.name, "utils");
        assert_eq!(dir.path, "/repo/src/utils");
        assert_eq!(dir.depth, 1);
    }

    #[test]
    fn test_file_stub_derives_name() {
        let stub = FileStub::new("file_0011223344556677", "src/main.rs", "proj");
        assert_eq!(stub.name, "main.rs");
        assert_eq!(stub.project, "proj");
    }
}
