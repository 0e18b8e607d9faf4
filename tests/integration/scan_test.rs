//! Directory scan tests

use depwalk::{ParseOutcome, Scanner};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Mixed script and style tree with a hidden directory and a non-source file
fn create_fixture() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();

    write(root, "js/index.js", "import b from './b';\nimport _ from 'lodash';\nrequire('./subdir/c');");
    write(root, "js/b.js", "export default require('./subdir/c');");
    write(root, "js/subdir/c.js", "module.exports = 42;");
    write(root, "css/index.scss", "@import 'a';\n// @import 'commented';\n@import '~bootstrap/scss/grid';");
    write(root, "css/a.scss", "/* @import 'x'; */\n.a { color: red; }");
    write(root, ".cache/hidden.js", "import 'should-not-appear';");
    write(root, "README.md", "import nothing");

    dir
}

fn key_set(result: &depwalk::ScanResult) -> BTreeSet<&str> {
    result.paths().collect()
}

#[test]
fn test_scan_everything() {
    let dir = create_fixture();
    let result = Scanner::with_defaults().scan::<&str>(dir.path(), &[]).unwrap();

    // files without dependencies, hidden files and unknown dialects are left out
    assert_eq!(
        key_set(&result),
        BTreeSet::from(["js/index.js", "js/b.js", "css/index.scss"])
    );
    assert_eq!(
        result.get("js/index.js").unwrap(),
        &["./b".to_string(), "lodash".to_string(), "./subdir/c".to_string()]
    );
    assert_eq!(
        result.get("css/index.scss").unwrap(),
        &["a".to_string(), "~bootstrap/scss/grid".to_string()]
    );
}

#[test]
fn test_scan_with_match_rule() {
    let dir = create_fixture();
    let result = Scanner::with_defaults().scan(dir.path(), &["js/index.js"]).unwrap();

    assert_eq!(key_set(&result), BTreeSet::from(["js/index.js"]));
}

#[test]
fn test_scan_star_does_not_cross_directories() {
    let dir = create_fixture();
    let result = Scanner::with_defaults().scan(dir.path(), &["js/*.js"]).unwrap();
    assert_eq!(key_set(&result), BTreeSet::from(["js/index.js", "js/b.js"]));

    let result = Scanner::with_defaults().scan(dir.path(), &["**/*.scss"]).unwrap();
    assert_eq!(key_set(&result), BTreeSet::from(["css/index.scss"]));
}

#[test]
fn test_scan_invalid_rule() {
    let dir = create_fixture();
    assert!(Scanner::with_defaults().scan(dir.path(), &["["]).is_err());
}

#[test]
fn test_parse_dispatches_on_path_kind() {
    let dir = create_fixture();
    let scanner = Scanner::with_defaults();

    match scanner.parse::<&str>(&dir.path().join("js/b.js"), &[]).unwrap() {
        ParseOutcome::File { specifiers, .. } => assert_eq!(specifiers, Some(vec!["./subdir/c".to_string()])),
        other => panic!("Expected a file outcome, got {:?}", other),
    }

    match scanner.parse::<&str>(&dir.path().join("README.md"), &[]).unwrap() {
        ParseOutcome::File { specifiers, .. } => assert_eq!(specifiers, None),
        other => panic!("Expected a file outcome, got {:?}", other),
    }

    match scanner.parse(&dir.path().join("css"), &["*.scss"]).unwrap() {
        ParseOutcome::Directory(result) => assert_eq!(key_set(&result), BTreeSet::from(["index.scss"])),
        other => panic!("Expected a directory outcome, got {:?}", other),
    }
}

#[test]
fn test_parse_missing_path() {
    let dir = tempdir().unwrap();
    assert!(Scanner::with_defaults().parse::<&str>(&dir.path().join("gone"), &[]).is_err());
}
