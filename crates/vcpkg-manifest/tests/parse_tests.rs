//! Integration tests for manifest parsing entry points.

use vcpkg_manifest::prelude::*;

const FIXTURE: &str = include_str!("fixtures/vcpkg.json");

// -- helpers ----------------------------------------------------------------

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn temp_manifest(name: &str, contents: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("vcpkg-manifest-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("vcpkg.json");
    std::fs::write(&path, contents).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn end_to_end_minimal_document() {
    init_tracing();
    let manifest = parse_str(
        r#"{"dependencies": {"fmt": {"version>=": "9.0.0"}}, "default-features": ["core"], "overrides": {"zlib": "1.2.11"}}"#,
    )
    .unwrap();

    assert_eq!(manifest.dependencies.len(), 1);
    assert_eq!(
        manifest.dependencies["fmt"],
        Dependency::new("fmt").with_min_version("9.0.0")
    );
    assert_eq!(manifest.default_features, vec![FeatureActivation::new("core")]);
    assert_eq!(manifest.overrides.len(), 1);
    assert_eq!(manifest.override_for("zlib"), Some("1.2.11"));
}

#[test]
fn realistic_fixture() {
    init_tracing();
    let manifest = parse_str(FIXTURE).unwrap();

    assert_eq!(
        manifest.default_features,
        vec![
            FeatureActivation::new("png"),
            FeatureActivation::new("jpeg").with_platform("!emscripten"),
        ]
    );

    let names: Vec<&str> = manifest.dependencies.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["curl", "fmt", "zlib"]);
    assert_eq!(manifest.dependencies["zlib"], Dependency::new("zlib"));
    assert_eq!(
        manifest.dependencies["curl"],
        Dependency::new("curl")
            .with_min_version("8.4.0")
            .with_default_features(false)
            .with_feature(FeatureActivation::new("ssl"))
            .with_feature(FeatureActivation::new("http2").with_platform("!uwp"))
            .with_platform("windows | linux")
    );

    let jpeg = &manifest.features["jpeg"];
    assert_eq!(jpeg.description, "JPEG support");
    assert_eq!(jpeg.license, None);
    assert_eq!(jpeg.supports, vec!["!uwp"]);
    assert_eq!(
        jpeg.dependencies,
        vec![Dependency::new("libjpeg-turbo").with_min_version("3.0.0")]
    );
    assert_eq!(manifest.features["png"].license, None);
    assert_eq!(
        manifest.features["gpu"].license.as_deref(),
        Some("Apache-2.0")
    );

    assert_eq!(manifest.override_for("libpng"), Some("1.6.40"));
    assert_eq!(manifest.all_dependencies().count(), 5);
}

#[test]
fn fixture_passes_strict_mode() {
    assert!(parse_str_with(FIXTURE, &ParseOptions::strict()).is_ok());
}

#[test]
fn entry_points_agree() {
    let path = temp_manifest("agree", FIXTURE);

    let from_str = parse_str(FIXTURE).unwrap();
    let from_slice = parse_slice(FIXTURE.as_bytes()).unwrap();
    let from_reader = parse_reader(FIXTURE.as_bytes()).unwrap();
    let from_file = parse_file(&path).unwrap();
    let from_parse: Manifest = FIXTURE.parse().unwrap();

    assert_eq!(from_str, from_slice);
    assert_eq!(from_str, from_reader);
    assert_eq!(from_str, from_file);
    assert_eq!(from_str, from_parse);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn file_size_limit() {
    let path = temp_manifest("limit", FIXTURE);
    let options = ParseOptions::new().with_max_input_bytes(64);
    let err = parse_file_with(&path, &options).unwrap_err();
    assert!(matches!(err, ManifestError::InputTooLarge { limit: 64 }));
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn truncated_fixture_yields_no_manifest() {
    let truncated = &FIXTURE[..FIXTURE.len() / 2];
    let err = parse_str(truncated).unwrap_err();
    assert!(matches!(err, ManifestError::Syntax { .. }), "got {err:?}");
}

#[test]
fn one_malformed_feature_dependency_fails_everything() {
    let err = parse_str(
        r#"{
            "dependencies": {"fmt": "fmt"},
            "features": {"x": {"description": "x", "dependencies": ["ok", 3]}}
        }"#,
    )
    .unwrap_err();
    match err {
        ManifestError::Shape { line, .. } => assert_eq!(line, 3),
        other => panic!("expected Shape, got {other:?}"),
    }
}

#[test]
fn re_encoded_fixture_decodes_identically() {
    let manifest = parse_str(FIXTURE).unwrap();
    let json = serde_json::to_string_pretty(&manifest).unwrap();
    assert_eq!(parse_str(&json).unwrap(), manifest);
}

#[test]
fn catalog_hands_off_decoded_manifest() {
    let output = catalog_manifest(FIXTURE.as_bytes(), &ParseOptions::default(), &UnwiredGraph)
        .unwrap();
    assert!(output.packages.is_empty());
    assert!(output.relationships.is_empty());

    let edges = |m: &Manifest| CatalogOutput {
        packages: Vec::new(),
        relationships: m
            .all_dependencies()
            .map(|(feature, dep)| Relationship {
                from: feature.unwrap_or("image-tools").to_owned(),
                to: dep.name.clone(),
            })
            .collect(),
    };
    let output = catalog_manifest(FIXTURE.as_bytes(), &ParseOptions::default(), &edges).unwrap();
    assert_eq!(output.relationships.len(), 5);
    assert!(output.relationships.contains(&Relationship {
        from: "jpeg".to_owned(),
        to: "libjpeg-turbo".to_owned(),
    }));
}

#[test]
fn parsing_is_independent_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| parse_str(FIXTURE).unwrap()))
        .collect();
    let results: Vec<Manifest> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
