use std::sync::Arc;

use tempfile::TempDir;

use grove_core::graph::{GraphDb, GraphStore, HierarchyIndexer, NodeLabel};
use grove_core::identity::IdentityResolver;

#[tokio::test]
async fn test_reopen_preserves_indexed_tree() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("graph.db");

    {
        let db = Arc::new(GraphDb::open(&db_path).await.unwrap());
        db.ensure_schema().await.unwrap();

        let indexer = HierarchyIndexer::new(db.clone(), IdentityResolver::default());
        indexer
            .index_hierarchy(
                "demo",
                "/project",
                &[
                    "/project/src/main.rs".to_string(),
                    "/project/README.md".to_string(),
                ],
                None,
            )
            .await
            .unwrap();
    }

    let db = GraphDb::open(&db_path).await.unwrap();
    assert!(db.is_initialized().await.unwrap());
    assert_eq!(db.count_label(NodeLabel::Project).await.unwrap(), 1);
    assert_eq!(db.count_label(NodeLabel::Directory).await.unwrap(), 1);
    assert_eq!(db.count_label(NodeLabel::File).await.unwrap(), 2);

    let src = db.directory("demo", "/project/src").await.unwrap().unwrap();
    assert_eq!(src.depth, 0);
}
