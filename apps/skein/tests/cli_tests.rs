//! CLI integration tests: diagram files, batch logging, configuration.

use skein::cli::{
    InputKind, append_results, cmd_catalog, cmd_components, cmd_homfly, cmd_reduce, load_diagram,
    read_input, run_batch,
};
use skein::config::SkeinConfig;
use skein_core::{EngineConfig, HomflyEngine, SkeinError, catalog};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).expect("write file");
    path
}

fn catalog_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    cmd_catalog(name, Some(&path)).expect("catalog");
    path
}

fn homfly_of(diagram: &skein_core::Diagram) -> String {
    HomflyEngine::default()
        .compute(diagram)
        .expect("homfly")
        .to_string()
}

// =============================================================================
// DIAGRAM FILES
// =============================================================================

#[test]
fn catalog_output_loads_back() {
    let dir = TempDir::new().expect("tempdir");
    let path = catalog_file(dir.path(), "trefoil");

    let loaded = load_diagram(&path).expect("load");
    assert_eq!(loaded.label(), "trefoil");
    assert_eq!(loaded.live_count(), 3);
    assert_eq!(
        homfly_of(&loaded),
        homfly_of(&catalog::trefoil().expect("trefoil"))
    );
}

#[test]
fn legacy_file_loads() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "fig8.json",
        r#"{
            "crossings": [
                {"i": 2, "j": 3, "k": 0},
                {"i": 3, "j": 0, "k": 1},
                {"i": 0, "j": 1, "k": 2},
                {"i": 1, "j": 2, "k": 3}
            ],
            "handedness": ["left", "right", "left", "right"]
        }"#,
    );

    let loaded = load_diagram(&path).expect("load");
    assert_eq!(loaded.label(), "fig8");
    assert_eq!(
        homfly_of(&loaded),
        homfly_of(&catalog::figure_eight().expect("figure-eight"))
    );
}

#[test]
fn malformed_json_is_serialization_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(dir.path(), "bad.json", "{\"crossings\": [");
    assert!(matches!(
        load_diagram(&path),
        Err(SkeinError::SerializationError(_))
    ));
}

#[test]
fn mismatched_handedness_is_invalid() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "short.json",
        r#"{"crossings": [{"i0": 1, "i1": 0, "j": 3, "k": 2}], "handedness": []}"#,
    );
    assert!(matches!(
        load_diagram(&path),
        Err(SkeinError::InvalidDiagram(_))
    ));
}

#[test]
fn unknown_crossing_key_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "extra.json",
        r#"{"crossings": [{"i0": 1, "i1": 0, "j": 0, "k": 1, "x": 1}], "handedness": ["right"]}"#,
    );
    assert!(matches!(
        load_diagram(&path),
        Err(SkeinError::SerializationError(_))
    ));
}

#[test]
fn diagram_needs_json_extension() {
    let dir = TempDir::new().expect("tempdir");
    let json = catalog_file(dir.path(), "hopf");
    let renamed = dir.path().join("hopf.txt");
    std::fs::rename(&json, &renamed).expect("rename");
    assert!(matches!(
        load_diagram(&renamed),
        Err(SkeinError::SerializationError(_))
    ));
}

#[test]
fn oversized_config_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let padding = "# padding\n".repeat(8 * 1024);
    let path = write(dir.path(), "big.toml", &padding);
    assert!(padding.len() as u64 > InputKind::Config.max_size());
    assert!(matches!(
        read_input(&path, InputKind::Config),
        Err(SkeinError::ConfigError(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let result = load_diagram(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(SkeinError::IoError(_))));
}

#[test]
fn directory_is_not_a_diagram() {
    let dir = TempDir::new().expect("tempdir");
    assert!(matches!(
        load_diagram(dir.path()),
        Err(SkeinError::IoError(_))
    ));
}

#[test]
fn unknown_catalog_name() {
    let dir = TempDir::new().expect("tempdir");
    let result = cmd_catalog("granny", Some(&dir.path().join("x.json")));
    assert!(result.is_err());
    assert!(!dir.path().join("x.json").exists());
}

#[test]
fn json_mode_commands_succeed() {
    let dir = TempDir::new().expect("tempdir");
    let trefoil = catalog_file(dir.path(), "trefoil");
    let config = SkeinConfig::default();
    cmd_homfly(&config, true, false, &trefoil, false).expect("homfly");
    cmd_reduce(true, &trefoil, None).expect("reduce");
    cmd_components(true, &trefoil).expect("components");
}

// =============================================================================
// BATCH
// =============================================================================

#[test]
fn batch_appends_rows_in_order() {
    let dir = TempDir::new().expect("tempdir");
    let trefoil = catalog_file(dir.path(), "trefoil");
    let hopf = catalog_file(dir.path(), "hopf");
    let log = dir.path().join("results.csv");

    let engine = HomflyEngine::default();
    let outcome = run_batch(&engine, &[trefoil.clone(), hopf], Some(&log)).expect("batch");
    assert_eq!(outcome.records.len(), 2);
    assert!(outcome.failures.is_empty());

    // A second run appends rather than truncating.
    run_batch(&engine, &[trefoil], Some(&log)).expect("batch");

    let text = std::fs::read_to_string(&log).expect("read log");
    let rows: Vec<&str> = text.lines().collect();
    let trefoil_row = format!(
        "trefoil,{}",
        homfly_of(&catalog::trefoil().expect("trefoil"))
    );
    let hopf_row = format!("hopf,{}", homfly_of(&catalog::hopf_link().expect("hopf")));
    assert_eq!(rows, vec![trefoil_row.as_str(), hopf_row.as_str(), trefoil_row.as_str()]);
}

#[test]
fn batch_records_depth_failures_and_continues() {
    let dir = TempDir::new().expect("tempdir");
    let trefoil = catalog_file(dir.path(), "trefoil");
    let unknot = catalog_file(dir.path(), "unknot");
    let log = dir.path().join("results.csv");

    let engine = HomflyEngine::new(EngineConfig {
        max_depth: 0,
        max_reductions: None,
    });
    let outcome = run_batch(&engine, &[trefoil, unknot], Some(&log)).expect("batch");

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].0, "trefoil");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "unknot");

    let text = std::fs::read_to_string(&log).expect("read log");
    assert_eq!(text, "unknot,1\n");
}

#[test]
fn batch_stops_on_unreadable_file() {
    let dir = TempDir::new().expect("tempdir");
    let bad = write(dir.path(), "bad.json", "not json");
    let result = run_batch(&HomflyEngine::default(), &[bad], None);
    assert!(matches!(result, Err(SkeinError::SerializationError(_))));
}

#[test]
fn append_requires_existing_directory() {
    let dir = TempDir::new().expect("tempdir");
    let log = dir.path().join("missing").join("results.csv");
    let result = append_results(&log, &["a,1".to_string()]);
    assert!(matches!(result, Err(SkeinError::IoError(_))));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn config_file_loads() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(
        dir.path(),
        "skein.toml",
        "[engine]\nmax_depth = 40\n\n[output]\nlatex = true\n",
    );

    let config = SkeinConfig::load(Some(&path)).expect("load");
    assert_eq!(config.engine.max_depth, 40);
    assert!(config.output.latex);
    assert_eq!(config.output.results_log, None);
}

#[test]
fn no_config_file_means_defaults() {
    let config = SkeinConfig::load(None).expect("load");
    assert_eq!(config, SkeinConfig::default());
}

#[test]
fn config_needs_toml_extension() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(dir.path(), "skein.ini", "[engine]\nmax_depth = 40\n");
    assert!(matches!(
        SkeinConfig::load(Some(&path)),
        Err(SkeinError::ConfigError(_))
    ));
}

#[test]
fn bad_config_is_config_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = write(dir.path(), "skein.toml", "[engine\n");
    assert!(matches!(
        SkeinConfig::load(Some(&path)),
        Err(SkeinError::ConfigError(_))
    ));
}
