//! Integration tests for catalog building and loading

use std::io::Write;
use std::sync::Arc;
use std::thread;

use stratum_catalog::{
    is_valid_name, CatalogError, CatalogFile, DependenciesModelBuilder, RecordingSink,
};

#[test]
fn test_name_rules_apply_to_aliases_and_bundles() {
    let cases = [
        ("groovy", true),
        ("groovy-core", true),
        ("groovy.json_2", true),
        ("gR00vy", true),
        ("g", false),
        ("Groovy", false),
        ("9groovy", false),
        ("groovy core", false),
        ("groovy+core", false),
    ];

    for (name, valid) in cases {
        assert_eq!(is_valid_name(name), valid, "{name}");

        let mut builder = DependenciesModelBuilder::new();
        let alias = builder.alias_with_version(name, "org.codehaus", "groovy", "3.0");
        let bundle = builder.bundle(name, Vec::<&str>::new());
        assert_eq!(alias.is_ok(), valid, "alias {name}");
        assert_eq!(bundle.is_ok(), valid, "bundle {name}");
    }
}

#[test]
fn test_redeclared_alias_replaces_and_warns_once() {
    let sink = Arc::new(RecordingSink::new());
    let mut builder = DependenciesModelBuilder::with_sink(sink.clone());

    builder
        .alias("guava", "com.google.guava", "guava", |v| {
            v.require("30.0-jre");
        })
        .unwrap();
    builder
        .alias("guava", "com.google.guava", "guava", |v| {
            v.require("31.1-jre").reject("31.0-jre");
        })
        .unwrap();

    let model = builder.build().unwrap();
    let guava = model.dependency("guava").unwrap();
    assert_eq!(guava.version().required_version(), "31.1-jre");
    assert_eq!(guava.version().rejected_versions(), ["31.0-jre"]);

    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("'guava'"));
    assert!(warnings[0].contains("30.0-jre"));
    assert!(warnings[0].contains("31.1-jre"));
}

#[test]
fn test_bundle_referencing_unknown_alias_fails_build() {
    let mut builder = DependenciesModelBuilder::new();
    builder.bundle("b1", ["x"]).unwrap();

    match builder.build() {
        Err(CatalogError::UnknownBundleAlias { bundle, alias }) => {
            assert_eq!(bundle, "b1");
            assert_eq!(alias, "x");
        }
        other => panic!("expected a missing alias error, got {other:?}"),
    }
}

#[test]
fn test_bundle_resolves_to_declared_dependency() {
    let mut builder = DependenciesModelBuilder::new();
    builder
        .alias("xx", "g", "a", |c| {
            c.require("1.0");
        })
        .unwrap();
    builder.bundle("b1", ["xx"]).unwrap();

    let model = builder.build().unwrap();
    let resolved = model.resolve_bundle("b1").unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0], model.dependency("xx").unwrap());
    assert_eq!(resolved[0].to_string(), "g:a:{require 1.0}");
}

#[test]
fn test_independent_declarations_are_interned() {
    let mut builder = DependenciesModelBuilder::new();
    let group = String::from("org.junit");
    let name = String::from("junit");
    builder
        .alias("junit-api", &group, &name, |v| {
            v.require("5.9");
        })
        .unwrap();
    builder
        .alias("junit-engine", "org.junit", "junit", |v| {
            v.require(String::from("5.9"));
        })
        .unwrap();

    let model = builder.build().unwrap();
    let api = model.dependency("junit-api").unwrap();
    let engine = model.dependency("junit-engine").unwrap();
    assert!(Arc::ptr_eq(api.group(), engine.group()));
    assert!(Arc::ptr_eq(api.name(), engine.name()));
    assert!(Arc::ptr_eq(api.version(), engine.version()));
}

#[test]
fn test_extension_name_defaults_and_overrides() {
    let mut builder = DependenciesModelBuilder::new();
    assert_eq!(builder.libraries_extension_name().get(), "libs");
    assert_eq!(builder.projects_extension_name().get(), "projects");

    builder.projects_extension_name_mut().set("modules");
    assert_eq!(builder.libraries_extension_name().get(), "libs");
    assert_eq!(builder.projects_extension_name().get(), "modules");
}

#[test]
fn test_snapshot_can_be_read_from_many_threads() {
    let mut builder = DependenciesModelBuilder::new();
    for i in 0..16 {
        builder
            .alias_with_version(&format!("lib{i}"), "org.example", &format!("lib{i}"), "1.0")
            .unwrap();
    }
    builder
        .bundle("all", (0..16).map(|i| format!("lib{i}")))
        .unwrap();
    let model = Arc::new(builder.build().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = Arc::clone(&model);
            thread::spawn(move || model.resolve_bundle("all").map(|deps| deps.len()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(16));
    }
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut builder = DependenciesModelBuilder::new();
    builder
        .alias("http", "org.web", "http", |v| {
            v.strictly("1.2").prefer("1.2.3");
        })
        .unwrap();
    builder.bundle("web", ["http"]).unwrap();

    let value = serde_json::to_value(builder.build().unwrap()).unwrap();
    assert_eq!(value["libraries"]["http"]["group"], "org.web");
    assert_eq!(value["libraries"]["http"]["version"]["strictly"], "1.2");
    assert_eq!(value["libraries"]["http"]["version"]["prefer"], "1.2.3");
    assert_eq!(value["bundles"]["web"][0], "http");
}

#[test]
fn test_load_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[versions]
junit = "5.9.2"

[libraries]
junit-api = {{ module = "org.junit.jupiter:junit-jupiter-api", version.ref = "junit" }}
junit-engine = {{ module = "org.junit.jupiter:junit-jupiter-engine", version.ref = "junit" }}

[bundles]
junit = ["junit-api", "junit-engine"]
"#
    )
    .unwrap();

    let catalog = CatalogFile::from_path(file.path()).unwrap();
    let mut builder = DependenciesModelBuilder::new();
    catalog.apply(&mut builder).unwrap();
    let model = builder.build().unwrap();

    let junit = model.resolve_bundle("junit").unwrap();
    assert_eq!(junit.len(), 2);
    assert!(Arc::ptr_eq(junit[0].version(), junit[1].version()));
    assert_eq!(junit[0].version().required_version(), "5.9.2");
}

#[test]
fn test_missing_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = CatalogFile::from_path(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, stratum_catalog::LoadError::Io(..)));
}
