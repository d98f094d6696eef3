//! Typed builders for composite keys and hash inputs.
//!
//! Every place that turns a `(project, path)` pair or an id pair into a
//! string goes through these functions, so the hashing-input contract and
//! the record-key layout have a single definition.

/// Hash input for a FILE id: the project name scopes the path, so the same
/// relative path in two projects never aliases.
pub fn file_hash_input(project_name: &str, file_path: &str) -> String {
    format!("{project_name}:{file_path}")
}

/// Hash input for an ENTITY id, optionally disambiguated by source path.
pub fn entity_hash_input(entity_name: &str, source_path: Option<&str>) -> String {
    match source_path {
        Some(path) => format!("{entity_name}:{path}"),
        None => entity_name.to_string(),
    }
}

/// Hash input for a RELATIONSHIP id. Order matters: A→B and B→A are
/// distinct relationships.
pub fn relationship_hash_input(source_id: &str, target_id: &str) -> String {
    format!("{source_id}->{target_id}")
}

/// Record key for a PROJECT node.
pub fn project_key(project_name: &str) -> String {
    project_name.to_string()
}

/// Record key for a DIRECTORY node, scoped by project.
pub fn directory_key(project_name: &str, path: &str) -> String {
    format!("{project_name}:{path}")
}
