// tests/unit_pipeline.rs
//! Full pipeline over real directories.

use std::fs;
use std::path::Path;

use bladegraph_core::analysis;
use bladegraph_core::config::Config;
use bladegraph_core::index::TemplateIndex;
use bladegraph_core::Error;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_invalid_utf8_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "good.blade.php", b"@include('bad')");
    write(dir.path(), "bad.blade.php", &[0xff, 0xfe, b'@']);

    let result = analysis::run(dir.path(), &Config::new()).unwrap();
    assert_eq!(result.file_errors.len(), 1);
    assert_eq!(result.file_errors[0].path, "bad.blade.php");
    // The unreadable template is still a known node and still resolvable.
    assert_eq!(result.graph.edge_count(), 1);
}

#[test]
fn test_missing_root_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let err = analysis::run(&dir.path().join("views"), &Config::new()).unwrap_err();
    assert!(matches!(err, Error::RootNotFound { .. }));
}

#[test]
fn test_id_map_round_trip_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    for rel in ["a.blade.php", "x/y.blade.php", "x/z/w.blade.php"] {
        write(dir.path(), rel, b"");
    }
    let result = analysis::run(dir.path(), &Config::new()).unwrap();
    let json = result.index.to_json().unwrap();
    let decoded = TemplateIndex::from_json(&json).unwrap();
    assert_eq!(decoded, result.index);
    for (id, path) in decoded.iter() {
        assert_eq!(decoded.get_id(path), Some(id));
    }
}

#[test]
fn test_config_suffix_and_exclude() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "page.tpl.php", b"@include('part')");
    write(dir.path(), "part.tpl.php", b"");
    write(dir.path(), "vendor/skip.tpl.php", b"");
    write(dir.path(), "old.blade.php", b"");
    write(
        dir.path(),
        "bladegraph.toml",
        b"suffix = \".tpl.php\"\nexclude = [\"^vendor/\"]\n",
    );

    let config = Config::load(dir.path()).unwrap();
    let result = analysis::run(dir.path(), &config).unwrap();
    assert_eq!(result.index.len(), 2);
    assert_eq!(result.graph.edge_count(), 1);
}

#[test]
fn test_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bladegraph.toml", b"suffix = [");
    assert!(matches!(Config::load(dir.path()), Err(Error::Config { .. })));
}
