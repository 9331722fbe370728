//! Writes each fixture collection to a file and compares it with the expected file in
//! `tests/json/`, line by line and then byte for byte.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

fn expected_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("json")
}

/// Write through `write` into a fresh output directory and compare with the fixture `name`.
fn run_fixture(name: &str, write: impl FnOnce(&Path) -> tree_json::Result<()>) -> anyhow::Result<()> {
    let actual_dir = TempDir::new()?;
    let actual_path = actual_dir.path().join(name);
    let expect_path = expected_dir().join(name);

    write(&actual_path)?;

    let actual = std::fs::read_to_string(&actual_path)?;
    let expect = std::fs::read_to_string(&expect_path)?;

    let actual_lines: Vec<&str> = actual.lines().collect();
    let expect_lines: Vec<&str> = expect.lines().collect();
    assert_eq!(
        expect_lines,
        actual_lines,
        "\nCompare {} and {} for differences.\n",
        actual_path.display(),
        expect_path.display()
    );
    assert_eq!(expect, actual, "{name}: identical lines but different bytes");
    Ok(())
}

// ── arrays ──────────────────────────────────────────────────────────────

#[test]
fn array_empty() -> anyhow::Result<()> {
    let test: BTreeSet<i32> = BTreeSet::new();
    run_fixture("array-empty.json", |p| tree_json::array_to_path(&test, p))
}

#[test]
fn array_single() -> anyhow::Result<()> {
    let mut test = BTreeSet::new();
    test.insert(1);
    run_fixture("array-single.json", |p| tree_json::array_to_path(&test, p))
}

#[test]
fn array_simple() -> anyhow::Result<()> {
    let mut test = BTreeSet::new();
    test.insert(3);
    test.insert(2);
    test.insert(1);
    run_fixture("array-simple.json", |p| tree_json::array_to_path(&test, p))
}

// ── objects ─────────────────────────────────────────────────────────────

#[test]
fn object_empty() -> anyhow::Result<()> {
    let test: BTreeMap<String, i32> = BTreeMap::new();
    run_fixture("object-empty.json", |p| tree_json::object_to_path(&test, p))
}

#[test]
fn object_single() -> anyhow::Result<()> {
    let mut test = BTreeMap::new();
    test.insert("hello".to_string(), 1);
    run_fixture("object-single.json", |p| tree_json::object_to_path(&test, p))
}

#[test]
fn object_simple() -> anyhow::Result<()> {
    let mut test = BTreeMap::new();
    test.insert("three".to_string(), 3);
    test.insert("two".to_string(), 2);
    test.insert("one".to_string(), 1);
    run_fixture("object-simple.json", |p| tree_json::object_to_path(&test, p))
}

// ── nested objects ──────────────────────────────────────────────────────

#[test]
fn nested_empty_empty() -> anyhow::Result<()> {
    let test: BTreeMap<String, BTreeSet<i32>> = BTreeMap::new();
    run_fixture("nested-empty-empty.json", |p| {
        tree_json::nested_object_to_path(&test, p)
    })
}

#[test]
fn nested_single_empty() -> anyhow::Result<()> {
    let mut test: BTreeMap<String, BTreeSet<i32>> = BTreeMap::new();
    test.insert("hello".to_string(), BTreeSet::new());
    run_fixture("nested-single-empty.json", |p| {
        tree_json::nested_object_to_path(&test, p)
    })
}

#[test]
fn nested_single_single() -> anyhow::Result<()> {
    let mut test: BTreeMap<String, BTreeSet<i32>> = BTreeMap::new();
    test.entry("hello".to_string()).or_default().insert(1);
    run_fixture("nested-single-single.json", |p| {
        tree_json::nested_object_to_path(&test, p)
    })
}

#[test]
fn nested_single_simple() -> anyhow::Result<()> {
    let mut test: BTreeMap<String, BTreeSet<i32>> = BTreeMap::new();
    let hello = test.entry("hello".to_string()).or_default();
    hello.insert(1);
    hello.insert(2);
    hello.insert(3);
    run_fixture("nested-single-simple.json", |p| {
        tree_json::nested_object_to_path(&test, p)
    })
}

#[test]
fn nested_simple_simple() -> anyhow::Result<()> {
    let mut test: BTreeMap<String, BTreeSet<i32>> = BTreeMap::new();
    test.entry("three".to_string()).or_default().extend([1, 2, 3]);
    test.entry("two".to_string()).or_default().extend([1, 2]);
    test.entry("one".to_string()).or_default().insert(1);
    run_fixture("nested-simple-simple.json", |p| {
        tree_json::nested_object_to_path(&test, p)
    })
}

// ── the same fixtures through the in-memory and generic paths ───────────

#[test]
fn string_and_generic_paths_match_fixtures() -> anyhow::Result<()> {
    let expect = |name: &str| std::fs::read_to_string(expected_dir().join(name));

    let set = BTreeSet::from([3, 2, 1]);
    assert_eq!(tree_json::array_to_string(&set)?, expect("array-simple.json")?);
    assert_eq!(tree_json::to_string(&set)?, expect("array-simple.json")?);

    let map = BTreeMap::from([("three", 3), ("two", 2), ("one", 1)]);
    assert_eq!(tree_json::object_to_string(&map)?, expect("object-simple.json")?);
    assert_eq!(tree_json::to_string(&map)?, expect("object-simple.json")?);

    let nested = BTreeMap::from([
        ("three", BTreeSet::from([1, 2, 3])),
        ("two", BTreeSet::from([1, 2])),
        ("one", BTreeSet::from([1])),
    ]);
    assert_eq!(
        tree_json::nested_object_to_string(&nested)?,
        expect("nested-simple-simple.json")?
    );
    assert_eq!(tree_json::to_string(&nested)?, expect("nested-simple-simple.json")?);
    Ok(())
}

#[test]
fn existing_output_is_overwritten() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("out.json");
    std::fs::write(&path, "stale content that is longer than the new output\n")?;

    tree_json::array_to_path(&BTreeSet::from([1]), &path)?;
    assert_eq!(std::fs::read_to_string(&path)?, "[\n\t1\n]");
    Ok(())
}
