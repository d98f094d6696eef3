//! Directory-hierarchy indexer.
//!
//! Turns a flat list of file paths into PROJECT → DIRECTORY → FILE nodes
//! connected by CONTAINS edges. Writes happen in two ordered phases: all
//! directory nodes first, then every edge, so no edge ever references a
//! node that has not been created yet. Within a phase, writes fan out up to
//! a configurable concurrency limit.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, warn};

use super::error::GraphError;
use super::models::{DirectoryRecord, FileStub, HierarchyStats, ProjectRecord, ProjectStatistics};
use super::store::{GraphStore, NodeLabel, NodeRef};
use crate::config::DEFAULT_MAX_CONCURRENT_WRITES;
use crate::identity::IdentityResolver;

/// Builds and maintains the containment tree for indexed projects.
pub struct HierarchyIndexer {
    store: Arc<dyn GraphStore>,
    resolver: IdentityResolver,
    max_concurrent_writes: usize,
}

impl HierarchyIndexer {
    /// Create an indexer over the given store.
    pub fn new(store: Arc<dyn GraphStore>, resolver: IdentityResolver) -> Self {
        Self {
            store,
            resolver,
            max_concurrent_writes: DEFAULT_MAX_CONCURRENT_WRITES,
        }
    }

    /// Override the per-phase write fan-out limit.
    pub fn with_concurrency(mut self, max_concurrent_writes: usize) -> Self {
        self.max_concurrent_writes = max_concurrent_writes.max(1);
        self
    }

    /// Index the directory hierarchy for a set of file paths.
    ///
    /// Every write is match-or-create, so re-running with the same or a
    /// superset of paths never duplicates nodes or edges; re-running the
    /// whole call is the retry strategy after any failure.
    ///
    /// `file_entity_mapping` supplies entity ids for files already
    /// registered by the extraction pipeline; unmapped paths get a
    /// content-addressed id from the resolver as a stable fallback.
    pub async fn index_hierarchy(
        &self,
        project_name: &str,
        project_root: &str,
        file_paths: &[String],
        file_entity_mapping: Option<&HashMap<String, String>>,
    ) -> Result<HierarchyStats, GraphError> {
        let project = project_name.trim();
        if project.is_empty() {
            return Err(GraphError::InvalidArgument(
                "project_name must not be empty".to_string(),
            ));
        }

        let root = normalize(project_root);
        info!(
            project,
            root = %root,
            files = file_paths.len(),
            "indexing directory hierarchy"
        );

        self.store
            .upsert_project(&ProjectRecord::new(project, &root))
            .await
            .map_err(|e| {
                error!(project, error = %e, "project upsert failed");
                e
            })?;

        let files: Vec<String> = file_paths.iter().map(|p| normalize(p)).collect();
        let directories = ancestor_directories(&root, &files);

        // Phase A: every directory node must exist before any edge
        // references it.
        let records: Vec<DirectoryRecord> = directories
            .iter()
            .map(|path| {
                let depth = match depth_below(&root, path) {
                    Some(depth) => depth,
                    None => {
                        warn!(
                            project,
                            path = %path,
                            root = %root,
                            "directory is not under the project root; defaulting depth to 0"
                        );
                        0
                    }
                };
                DirectoryRecord::new(project, path.clone(), depth)
            })
            .collect();

        self.fan_out(records.iter().map(|record| {
            let store = Arc::clone(&self.store);
            async move {
                store.upsert_directory(record).await.map_err(|e| {
                    error!(path = %record.path, error = %e, "directory upsert failed");
                    e
                })
            }
        }))
        .await?;

        // Phase B: containment edges, directories first, then files.
        let project_node = NodeRef::project(project);
        let mut relationships = 0;

        let mut directory_edges = Vec::new();
        for path in &directories {
            let to = NodeRef::directory(project, path);
            let from = match parent_of(path) {
                Some(parent) if parent == root => project_node.clone(),
                Some(parent) if directories.contains(&parent) => {
                    NodeRef::directory(project, &parent)
                }
                parent => {
                    warn!(
                        project,
                        path = %path,
                        parent = ?parent,
                        "directory parent is neither the root nor indexed; attaching to project"
                    );
                    project_node.clone()
                }
            };
            directory_edges.push((from, to));
        }

        relationships += directory_edges.len();
        self.fan_out(directory_edges.iter().map(|(from, to)| {
            let store = Arc::clone(&self.store);
            let rel_id = self.edge_id(from, to)?;
            Ok(async move {
                store.relate_contains(from, to, &rel_id).await.map_err(|e| {
                    error!(from = %from.qualified(), to = %to.qualified(), error = %e, "relate failed");
                    e
                })
            })
        }).collect::<Result<Vec<_>, GraphError>>()?)
        .await?;

        let mut file_jobs = Vec::new();
        for (raw, path) in file_paths.iter().zip(&files) {
            let entity_id = match lookup_mapping(file_entity_mapping, raw, path) {
                Some(id) => id.to_string(),
                None => self
                    .resolver
                    .file_id(project, path)
                    .map_err(|e| GraphError::InvalidArgument(e.to_string()))?,
            };

            let from = match parent_of(path) {
                Some(parent) if parent == root => project_node.clone(),
                Some(parent) if directories.contains(&parent) => {
                    NodeRef::directory(project, &parent)
                }
                parent => {
                    warn!(
                        project,
                        path = %path,
                        parent = ?parent,
                        "file parent is neither the root nor indexed; attaching to project"
                    );
                    project_node.clone()
                }
            };

            let stub = FileStub::new(&entity_id, path.clone(), project);
            file_jobs.push((from, NodeRef::file(&entity_id), stub));
        }

        relationships += file_jobs.len();
        self.fan_out(file_jobs.iter().map(|(from, to, stub)| {
            let store = Arc::clone(&self.store);
            let rel_id = self.edge_id(from, to)?;
            Ok(async move {
                store.ensure_file(stub).await.map_err(|e| {
                    error!(entity_id = %stub.entity_id, error = %e, "file upsert failed");
                    e
                })?;
                store.relate_contains(from, to, &rel_id).await.map_err(|e| {
                    error!(from = %from.qualified(), to = %to.qualified(), error = %e, "relate failed");
                    e
                })
            })
        }).collect::<Result<Vec<_>, GraphError>>()?)
        .await?;

        let stats = HierarchyStats {
            projects: 1,
            directories: directories.len(),
            files: file_paths.len(),
            relationships,
        };
        debug!(project, ?stats, "hierarchy indexing complete");

        Ok(stats)
    }

    /// Read-only aggregate over an indexed project: nodes reachable from
    /// the PROJECT node via CONTAINS.
    ///
    /// This is an advisory path; query failures are reported as zeroed
    /// counts rather than raised.
    pub async fn project_statistics(&self, project_name: &str) -> ProjectStatistics {
        match self.reachable_statistics(project_name).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(
                    project = project_name,
                    error = %e,
                    "statistics query failed; returning zeroed counts"
                );
                ProjectStatistics::default()
            }
        }
    }

    async fn reachable_statistics(
        &self,
        project_name: &str,
    ) -> Result<ProjectStatistics, GraphError> {
        let project = project_name.trim();
        if self.store.project(project).await?.is_none() {
            return Ok(ProjectStatistics::default());
        }

        let start = NodeRef::project(project);
        let mut seen: HashSet<NodeRef> = HashSet::new();
        let mut queue: VecDeque<NodeRef> = VecDeque::from([start]);
        let mut directories = 0;
        let mut files = 0;

        while let Some(node) = queue.pop_front() {
            for child in self.store.children_of(&node).await? {
                if !seen.insert(child.clone()) {
                    continue;
                }
                match child.label {
                    NodeLabel::Directory => {
                        directories += 1;
                        queue.push_back(child);
                    }
                    NodeLabel::File => files += 1,
                    _ => {}
                }
            }
        }

        Ok(ProjectStatistics {
            directories,
            files,
            total_nodes: directories + files + 1,
        })
    }

    /// Run independent write futures with bounded concurrency, failing the
    /// whole phase on the first error.
    async fn fan_out<F>(&self, jobs: impl IntoIterator<Item = F>) -> Result<(), GraphError>
    where
        F: std::future::Future<Output = Result<(), GraphError>>,
    {
        let mut results = stream::iter(jobs).buffer_unordered(self.max_concurrent_writes);
        while let Some(result) = results.next().await {
            result?;
        }
        Ok(())
    }

    fn edge_id(&self, from: &NodeRef, to: &NodeRef) -> Result<String, GraphError> {
        self.resolver
            .relationship_id(&from.qualified(), &to.qualified())
            .map_err(|e| GraphError::InvalidArgument(e.to_string()))
    }
}

fn lookup_mapping<'a>(
    mapping: Option<&'a HashMap<String, String>>,
    raw_path: &str,
    normalized_path: &str,
) -> Option<&'a str> {
    let mapping = mapping?;
    mapping
        .get(raw_path)
        .or_else(|| mapping.get(normalized_path))
        .map(String::as_str)
}

/// Strip trailing separators; the filesystem root stays "/".
fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed == "/" {
        return trimmed.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}

/// Syntactic parent of a path; no filesystem access.
fn parent_of(path: &str) -> Option<String> {
    Path::new(path)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
}

/// Depth of a directory below the project root: a directory directly under
/// the root has depth 0. None when the path is not under the root.
fn depth_below(root: &str, path: &str) -> Option<u32> {
    let segments = if root.is_empty() {
        if path.is_empty() || path.starts_with('/') {
            return None;
        }
        Path::new(path).components().count()
    } else {
        let relative = Path::new(path).strip_prefix(root).ok()?;
        relative.components().count()
    };

    if segments == 0 {
        return None;
    }
    Some((segments - 1) as u32)
}

/// Unique ancestor directories of the given files, strictly between the
/// project root (exclusive) and each file (inclusive of its immediate
/// parent). Only directories with at least one indexed file beneath them
/// appear; indexing never materializes empty directories.
fn ancestor_directories(root: &str, file_paths: &[String]) -> BTreeSet<String> {
    let mut directories = BTreeSet::new();

    for file in file_paths {
        let mut current = parent_of(file);
        while let Some(dir) = current {
            if dir == root || depth_below(root, &dir).is_none() {
                break;
            }
            // Ancestors of an already-collected directory are collected too.
            if !directories.insert(dir.clone()) {
                break;
            }
            current = parent_of(&dir);
        }
    }

    directories
}
