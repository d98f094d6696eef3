//! Deterministic entity identity for the knowledge graph.
//!
//! Ids are content-addressed: a fixed-length slice of a SHA-256 digest over
//! the inputs that name the record, with a type prefix. Identical inputs
//! always produce the same id, and the project name participates in file-id
//! hashing so paths never alias across projects.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::keys;

/// Hex length of the legacy checksum-based id scheme.
const LEGACY_CHECKSUM_HEX_LEN: usize = 8;

/// Errors from identity resolution and format checks.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Empty or otherwise unusable input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An id that does not match the current scheme.
    #[error("Invalid id format '{id}': {hint}")]
    InvalidFormat { id: String, hint: String },
}

/// The kinds of identifiers the resolver produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    File,
    Entity,
    Relationship,
}

impl EntityKind {
    /// Prefix of the current id scheme for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::File => "file_",
            EntityKind::Entity => "entity-",
            EntityKind::Relationship => "rel-",
        }
    }
}

/// Classification of a candidate id against known schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFormat {
    /// Matches the current hash-based scheme.
    Current(EntityKind),
    /// Legacy composite id with an embedded path, e.g. `file:project:/src/a.py`.
    LegacyPathEmbedded,
    /// Legacy checksum-based id with a short non-cryptographic hash.
    LegacyChecksum,
    /// Not a recognized id shape.
    Unrecognized,
}

impl IdFormat {
    /// Whether this shape belongs to a deprecated scheme.
    pub fn is_deprecated(&self) -> bool {
        matches!(self, IdFormat::LegacyPathEmbedded | IdFormat::LegacyChecksum)
    }

    /// Human-readable description for migration tooling.
    pub fn description(&self) -> &'static str {
        match self {
            IdFormat::Current(_) => "current hash-based id",
            IdFormat::LegacyPathEmbedded => {
                "deprecated path-embedded id (type:project:path); regenerate from the path and project name"
            }
            IdFormat::LegacyChecksum => {
                "deprecated checksum id (8 hex chars); regenerate with the SHA-256 scheme"
            }
            IdFormat::Unrecognized => "not a recognized id shape",
        }
    }
}

/// Produces and validates entity identifiers.
///
/// Constructed once with its hash-length configuration and passed by
/// reference; holds no mutable state and performs no I/O.
#[derive(Debug, Clone, Copy)]
pub struct IdentityResolver {
    file_hash_len: usize,
    entity_hash_len: usize,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self {
            file_hash_len: Self::DEFAULT_FILE_HASH_LEN,
            entity_hash_len: Self::DEFAULT_ENTITY_HASH_LEN,
        }
    }
}

impl IdentityResolver {
    /// Default hex length of the FILE id hash suffix.
    pub const DEFAULT_FILE_HASH_LEN: usize = 16;

    /// Default hex length of the ENTITY and RELATIONSHIP id hash suffix.
    pub const DEFAULT_ENTITY_HASH_LEN: usize = 12;

    /// Create a resolver with explicit hash lengths (in hex digits).
    ///
    /// Lengths must be even, non-zero, and at most 64 (a full SHA-256).
    pub fn new(file_hash_len: usize, entity_hash_len: usize) -> Result<Self, IdentityError> {
        for (name, len) in [
            ("file_hash_len", file_hash_len),
            ("entity_hash_len", entity_hash_len),
        ] {
            if len == 0 || len % 2 != 0 || len > 64 {
                return Err(IdentityError::InvalidArgument(format!(
                    "{name} must be an even number of hex digits between 2 and 64, got {len}"
                )));
            }
        }

        Ok(Self {
            file_hash_len,
            entity_hash_len,
        })
    }

    /// Hex length of the hash suffix for the given kind.
    pub fn hash_len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::File => self.file_hash_len,
            EntityKind::Entity | EntityKind::Relationship => self.entity_hash_len,
        }
    }

    /// Generate the id for a FILE node.
    pub fn file_id(&self, project_name: &str, file_path: &str) -> Result<String, IdentityError> {
        if project_name.is_empty() {
            return Err(IdentityError::InvalidArgument(
                "project_name must not be empty".to_string(),
            ));
        }
        if file_path.is_empty() {
            return Err(IdentityError::InvalidArgument(
                "file_path must not be empty".to_string(),
            ));
        }

        let input = keys::file_hash_input(project_name, file_path);
        Ok(format!(
            "{}{}",
            EntityKind::File.prefix(),
            self.digest(&input, self.file_hash_len)
        ))
    }

    /// Generate the id for an extracted code entity.
    ///
    /// `source_path` disambiguates same-named symbols defined in different
    /// files.
    pub fn entity_id(
        &self,
        entity_name: &str,
        source_path: Option<&str>,
    ) -> Result<String, IdentityError> {
        if entity_name.is_empty() {
            return Err(IdentityError::InvalidArgument(
                "entity_name must not be empty".to_string(),
            ));
        }

        let input = keys::entity_hash_input(entity_name, source_path);
        Ok(format!(
            "{}{}",
            EntityKind::Entity.prefix(),
            self.digest(&input, self.entity_hash_len)
        ))
    }

    /// Generate the id for a relationship between two entities.
    pub fn relationship_id(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<String, IdentityError> {
        if source_id.is_empty() {
            return Err(IdentityError::InvalidArgument(
                "source_id must not be empty".to_string(),
            ));
        }
        if target_id.is_empty() {
            return Err(IdentityError::InvalidArgument(
                "target_id must not be empty".to_string(),
            ));
        }

        let input = keys::relationship_hash_input(source_id, target_id);
        Ok(format!(
            "{}{}",
            EntityKind::Relationship.prefix(),
            self.digest(&input, self.entity_hash_len)
        ))
    }

    /// Structural check against the current scheme: correct prefix, exact
    /// length, lowercase-hex body. Does not verify the id was produced by
    /// this resolver's hash function.
    pub fn validate_format(&self, id: &str, kind: EntityKind) -> bool {
        let Some(body) = id.strip_prefix(kind.prefix()) else {
            return false;
        };
        body.len() == self.hash_len(kind) && is_lower_hex(body)
    }

    /// Classify a candidate id against known legacy and current shapes.
    pub fn detect_deprecated_format(&self, id: &str) -> IdFormat {
        // Legacy composite ids separate type, project and path with colons.
        for legacy_prefix in ["file:", "dir:", "entity:", "rel:"] {
            if id.starts_with(legacy_prefix) {
                return IdFormat::LegacyPathEmbedded;
            }
        }

        for kind in [EntityKind::File, EntityKind::Entity, EntityKind::Relationship] {
            if let Some(body) = id.strip_prefix(kind.prefix()) {
                if self.validate_format(id, kind) {
                    return IdFormat::Current(kind);
                }
                if body.len() == LEGACY_CHECKSUM_HEX_LEN
                    && self.hash_len(kind) != LEGACY_CHECKSUM_HEX_LEN
                    && is_lower_hex(body)
                {
                    return IdFormat::LegacyChecksum;
                }
                return IdFormat::Unrecognized;
            }
        }

        IdFormat::Unrecognized
    }

    /// Reject deprecated or malformed ids with a migration hint.
    pub fn enforce_format(&self, id: &str, kind: EntityKind) -> Result<(), IdentityError> {
        if self.validate_format(id, kind) {
            return Ok(());
        }

        let format = self.detect_deprecated_format(id);
        let hint = if format.is_deprecated() {
            format.description().to_string()
        } else {
            format!(
                "expected {}{} lowercase hex chars",
                kind.prefix(),
                self.hash_len(kind)
            )
        };

        Err(IdentityError::InvalidFormat {
            id: id.to_string(),
            hint,
        })
    }

    /// Fixed-length hex slice of a SHA-256 digest over the input bytes.
    fn digest(&self, input: &str, len: usize) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        let mut encoded = hex::encode(hasher.finalize());
        encoded.truncate(len);
        encoded
    }
}

fn is_lower_hex(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
