//! SurrealDB embedded backend for the hierarchy graph.

use std::path::Path;
use surrealdb::engine::local::{Db, Mem, RocksDb};
use surrealdb::sql::Thing;
use surrealdb::Surreal;

use async_trait::async_trait;

use super::error::GraphError;
use super::models::{DirectoryRecord, FileStub, ProjectRecord};
use super::store::{GraphStore, NodeLabel, NodeRef};
use crate::keys;

/// Database connection for the hierarchy graph.
pub struct GraphDb {
    db: Surreal<Db>,
}

impl GraphDb {
    /// Open or create a database at the given path.
    pub async fn open(path: &Path) -> Result<Self, GraphError> {
        let db = Surreal::new::<RocksDb>(path).await?;
        db.use_ns("grove").use_db("hierarchy").await?;

        Ok(Self { db })
    }

    /// Open a non-persistent in-memory database.
    pub async fn open_in_memory() -> Result<Self, GraphError> {
        let db = Surreal::new::<Mem>(()).await?;
        db.use_ns("grove").use_db("hierarchy").await?;

        Ok(Self { db })
    }

    fn thing(node: &NodeRef) -> Thing {
        Thing::from((node.label.table(), node.key.as_str()))
    }

    fn node_ref(thing: &Thing) -> Option<NodeRef> {
        NodeLabel::from_table(&thing.tb).map(|label| NodeRef {
            label,
            key: thing.id.to_raw(),
        })
    }
}

#[async_trait]
impl GraphStore for GraphDb {
    async fn ensure_schema(&self) -> Result<(), GraphError> {
        // Node tables
        self.db
            .query(
                r#"
                DEFINE TABLE project SCHEMAFULL;
                DEFINE FIELD name ON project TYPE string;
                DEFINE FIELD root_path ON project TYPE string;
                DEFINE FIELD indexed_at ON project TYPE datetime;
                DEFINE INDEX project_name ON project FIELDS name UNIQUE;
                "#,
            )
            .await?;

        self.db
            .query(
                r#"
                DEFINE TABLE directory SCHEMAFULL;
                DEFINE FIELD name ON directory TYPE string;
                DEFINE FIELD path ON directory TYPE string;
                DEFINE FIELD project ON directory TYPE string;
                DEFINE FIELD depth ON directory TYPE int;
                DEFINE FIELD created_at ON directory TYPE datetime;
                DEFINE FIELD updated_at ON directory TYPE datetime;
                DEFINE INDEX directory_path ON directory FIELDS project, path UNIQUE;
                "#,
            )
            .await?;

        // FILE records are owned by the upstream extraction pipeline, which
        // attaches its own properties; only the fields this subsystem needs
        // are declared.
        self.db
            .query(
                r#"
                DEFINE TABLE file SCHEMALESS;
                DEFINE FIELD entity_id ON file TYPE string;
                DEFINE INDEX file_entity ON file FIELDS entity_id UNIQUE;

                DEFINE TABLE entity SCHEMALESS;
                "#,
            )
            .await?;

        // Edge table: the unique (in, out) index is what makes edge
        // creation converge under redelivery.
        self.db
            .query(
                r#"
                DEFINE TABLE contains TYPE RELATION;
                DEFINE INDEX contains_unique ON contains FIELDS in, out UNIQUE;
                "#,
            )
            .await?;

        self.db
            .query(
                r#"
                DEFINE TABLE metadata SCHEMAFULL;
                DEFINE FIELD key ON metadata TYPE string;
                DEFINE FIELD value ON metadata TYPE any;
                DEFINE FIELD updated_at ON metadata TYPE datetime;
                DEFINE INDEX metadata_key ON metadata FIELDS key UNIQUE;

                INSERT IGNORE INTO metadata { key: 'initialized', value: true, updated_at: time::now() };
                INSERT IGNORE INTO metadata { key: 'schema_version', value: '1.0', updated_at: time::now() };
                "#,
            )
            .await?;

        Ok(())
    }

    async fn is_initialized(&self) -> Result<bool, GraphError> {
        let result: Option<serde_json::Value> = self
            .db
            .query("SELECT value FROM metadata WHERE key = 'initialized'")
            .await?
            .take(0)?;

        Ok(result.is_some())
    }

    async fn upsert_project(&self, project: &ProjectRecord) -> Result<(), GraphError> {
        self.db
            .query(
                r#"
                UPSERT type::thing('project', $key) SET
                    name = $name,
                    root_path = $root_path,
                    indexed_at = time::now()
                "#,
            )
            .bind(("key", keys::project_key(&project.name)))
            .bind(("name", project.name.clone()))
            .bind(("root_path", project.root_path.clone()))
            .await?;

        Ok(())
    }

    async fn upsert_directory(&self, directory: &DirectoryRecord) -> Result<(), GraphError> {
        self.db
            .query(
                r#"
                UPSERT type::thing('directory', $key) SET
                    created_at = created_at ?? time::now(),
                    updated_at = time::now(),
                    name = $name,
                    path = $path,
                    project = $project,
                    depth = $depth
                "#,
            )
            .bind(("key", keys::directory_key(&directory.project, &directory.path)))
            .bind(("name", directory.name.clone()))
            .bind(("path", directory.path.clone()))
            .bind(("project", directory.project.clone()))
            .bind(("depth", directory.depth as i64))
            .await?;

        Ok(())
    }

    async fn ensure_file(&self, file: &FileStub) -> Result<(), GraphError> {
        // The ?? fallbacks keep properties written by the upstream pipeline
        // intact when the record already exists.
        self.db
            .query(
                r#"
                UPSERT type::thing('file', $key) SET
                    entity_id = $entity_id,
                    path = path ?? $path,
                    name = name ?? $name,
                    project = project ?? $project
                "#,
            )
            .bind(("key", file.entity_id.clone()))
            .bind(("entity_id", file.entity_id.clone()))
            .bind(("path", file.path.clone()))
            .bind(("name", file.name.clone()))
            .bind(("project", file.project.clone()))
            .await?;

        Ok(())
    }

    async fn relate_contains(
        &self,
        from: &NodeRef,
        to: &NodeRef,
        rel_id: &str,
    ) -> Result<(), GraphError> {
        // The edge id is content-addressed from its endpoints, so a re-run
        // inserts the same record id and IGNORE makes it a no-op.
        self.db
            .query(
                r#"
                INSERT RELATION IGNORE INTO contains {
                    id: type::thing('contains', $rel_id),
                    in: $from,
                    out: $to
                }
                "#,
            )
            .bind(("rel_id", rel_id.to_string()))
            .bind(("from", Self::thing(from)))
            .bind(("to", Self::thing(to)))
            .await?;

        Ok(())
    }

    async fn children_of(&self, node: &NodeRef) -> Result<Vec<NodeRef>, GraphError> {
        let targets: Vec<Thing> = self
            .db
            .query("SELECT VALUE out FROM contains WHERE in = $node")
            .bind(("node", Self::thing(node)))
            .await?
            .take(0)?;

        Ok(targets.iter().filter_map(Self::node_ref).collect())
    }

    async fn directory(
        &self,
        project_name: &str,
        path: &str,
    ) -> Result<Option<DirectoryRecord>, GraphError> {
        let record: Option<DirectoryRecord> = self
            .db
            .query("SELECT * FROM type::thing('directory', $key)")
            .bind(("key", keys::directory_key(project_name, path)))
            .await?
            .take(0)?;

        Ok(record)
    }

    async fn project(&self, project_name: &str) -> Result<Option<ProjectRecord>, GraphError> {
        let record: Option<ProjectRecord> = self
            .db
            .query("SELECT * FROM type::thing('project', $key)")
            .bind(("key", keys::project_key(project_name)))
            .await?
            .take(0)?;

        Ok(record)
    }

    async fn count_label(&self, label: NodeLabel) -> Result<usize, GraphError> {
        #[derive(serde::Deserialize)]
        struct CountResult {
            count: i64,
        }

        let result: Option<CountResult> = self
            .db
            .query(format!("SELECT count() FROM {} GROUP ALL", label.table()))
            .await?
            .take(0)?;

        Ok(result.map(|r| r.count as usize).unwrap_or(0))
    }

    async fn duplicate_file_entity_ids(&self) -> Result<Vec<String>, GraphError> {
        #[derive(serde::Deserialize)]
        struct GroupResult {
            entity_id: String,
            total: i64,
        }

        let groups: Vec<GroupResult> = self
            .db
            .query("SELECT entity_id, count() AS total FROM file GROUP BY entity_id")
            .await?
            .take(0)?;

        Ok(groups
            .into_iter()
            .filter(|g| g.total > 1)
            .map(|g| g.entity_id)
            .collect())
    }
}
