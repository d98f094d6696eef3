use grove_core::identity::{EntityKind, IdFormat, IdentityError, IdentityResolver};

#[test]
fn test_file_id_is_deterministic() {
    let resolver = IdentityResolver::default();

    let first = resolver.file_id("backend", "/src/api/handlers.py").unwrap();
    let second = resolver.file_id("backend", "/src/api/handlers.py").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_file_id_separates_projects() {
    let resolver = IdentityResolver::default();

    let in_a = resolver.file_id("project-a", "/x.py").unwrap();
    let in_b = resolver.file_id("project-b", "/x.py").unwrap();
    assert_ne!(in_a, in_b);
}

#[test]
fn test_file_id_separates_paths() {
    let resolver = IdentityResolver::default();

    let a = resolver.file_id("project", "/a.py").unwrap();
    let b = resolver.file_id("project", "/b.py").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_file_id_shape() {
    let resolver = IdentityResolver::default();

    let id = resolver.file_id("project", "/src/main.rs").unwrap();
    assert!(id.starts_with("file_"));
    assert_eq!(id.len(), "file_".len() + IdentityResolver::DEFAULT_FILE_HASH_LEN);
    assert!(resolver.validate_format(&id, EntityKind::File));
}

#[test]
fn test_entity_id_source_path_disambiguates() {
    let resolver = IdentityResolver::default();

    let bare = resolver.entity_id("parse", None).unwrap();
    let in_lib = resolver.entity_id("parse", Some("src/lib.rs")).unwrap();
    let in_bin = resolver.entity_id("parse", Some("src/main.rs")).unwrap();

    assert!(bare.starts_with("entity-"));
    assert_ne!(bare, in_lib);
    assert_ne!(in_lib, in_bin);
}

#[test]
fn test_relationship_id_order_matters() {
    let resolver = IdentityResolver::default();

    let forward = resolver.relationship_id("entity-aaaa", "entity-bbbb").unwrap();
    let backward = resolver.relationship_id("entity-bbbb", "entity-aaaa").unwrap();

    assert!(forward.starts_with("rel-"));
    assert_ne!(forward, backward);
}

#[test]
fn test_empty_inputs_rejected() {
    let resolver = IdentityResolver::default();

    assert!(matches!(
        resolver.file_id("", "/a.py"),
        Err(IdentityError::InvalidArgument(_))
    ));
    assert!(matches!(
        resolver.file_id("project", ""),
        Err(IdentityError::InvalidArgument(_))
    ));
    assert!(matches!(
        resolver.entity_id("", None),
        Err(IdentityError::InvalidArgument(_))
    ));
    assert!(matches!(
        resolver.relationship_id("", "entity-bbbb"),
        Err(IdentityError::InvalidArgument(_))
    ));
    assert!(matches!(
        resolver.relationship_id("entity-aaaa", ""),
        Err(IdentityError::InvalidArgument(_))
    ));
}

#[test]
fn test_hash_length_must_be_even_and_bounded() {
    assert!(matches!(
        IdentityResolver::new(15, 12),
        Err(IdentityError::InvalidArgument(_))
    ));
    assert!(matches!(
        IdentityResolver::new(16, 0),
        Err(IdentityError::InvalidArgument(_))
    ));
    assert!(matches!(
        IdentityResolver::new(66, 12),
        Err(IdentityError::InvalidArgument(_))
    ));
    assert!(IdentityResolver::new(32, 24).is_ok());
}

#[test]
fn test_configured_lengths_apply() {
    let resolver = IdentityResolver::new(32, 8).unwrap();

    let file = resolver.file_id("project", "/a.py").unwrap();
    let entity = resolver.entity_id("parse", None).unwrap();
    assert_eq!(file.len(), "file_".len() + 32);
    assert_eq!(entity.len(), "entity-".len() + 8);
}

#[test]
fn test_validate_format_rejects_malformed_ids() {
    let resolver = IdentityResolver::default();

    // wrong prefix
    assert!(!resolver.validate_format("entity-0011223344556677", EntityKind::File));
    // wrong length
    assert!(!resolver.validate_format("file_0011", EntityKind::File));
    // uppercase hex
    assert!(!resolver.validate_format("file_0011223344AABBCC", EntityKind::File));
    // non-hex body
    assert!(!resolver.validate_format("file_00112233445566zz", EntityKind::File));
}

#[test]
fn test_detect_deprecated_path_embedded() {
    let resolver = IdentityResolver::default();

    let format = resolver.detect_deprecated_format("file:backend:/src/api/handlers.py");
    assert_eq!(format, IdFormat::LegacyPathEmbedded);
    assert!(format.is_deprecated());
}

#[test]
fn test_detect_deprecated_checksum() {
    let resolver = IdentityResolver::default();

    let format = resolver.detect_deprecated_format("file_00aabbcc");
    assert_eq!(format, IdFormat::LegacyChecksum);
    assert!(format.is_deprecated());
}

#[test]
fn test_detect_current_and_unrecognized() {
    let resolver = IdentityResolver::default();

    let current = resolver.file_id("project", "/a.py").unwrap();
    assert_eq!(
        resolver.detect_deprecated_format(&current),
        IdFormat::Current(EntityKind::File)
    );
    assert_eq!(
        resolver.detect_deprecated_format("not-an-id"),
        IdFormat::Unrecognized
    );
}

#[test]
fn test_enforce_format_accepts_current_scheme() {
    let resolver = IdentityResolver::default();

    let id = resolver.file_id("project", "/a.py").unwrap();
    assert!(resolver.enforce_format(&id, EntityKind::File).is_ok());
}

#[test]
fn test_enforce_format_gives_migration_hint_for_legacy_ids() {
    let resolver = IdentityResolver::default();

    let err = resolver
        .enforce_format("file:backend:/src/a.py", EntityKind::File)
        .unwrap_err();
    match err {
        IdentityError::InvalidFormat { hint, .. } => {
            assert!(hint.contains("regenerate"));
        }
        other => panic!("expected InvalidFormat, got {other:?}"),
    }
}
