//! Conformance tests that run YAML fixtures against the engine.
//!
//! Run with: cargo test -p credql-test --test conformance --features credql-test/fixtures

#![cfg(feature = "fixtures")]

use credql_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and run every fixture in the given file.
fn run_fixture_file(file_name: &str) {
    let path = fixtures_dir().join(file_name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));

    let fixtures = Fixture::from_yaml_multi(&yaml)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()));
    assert!(!fixtures.is_empty(), "no fixtures in {}", path.display());

    for fixture in fixtures {
        println!("running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn username_fixtures() {
    run_fixture_file("01_username.yaml");
}

#[test]
fn property_fixtures() {
    run_fixture_file("02_properties.yaml");
}

#[test]
fn combinator_fixtures() {
    run_fixture_file("03_combinators.yaml");
}

#[test]
fn every_fixture_file_is_covered() {
    let mut files: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read fixtures dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(
        files,
        vec!["01_username.yaml", "02_properties.yaml", "03_combinators.yaml"]
    );
}
