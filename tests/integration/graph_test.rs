//! Graph traversal tests against fixture trees built on the fly

use depwalk::{
    BuildOptions, DependencyTarget, Dialect, Entry, GraphBuilder, WalkerError,
};
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Write `content` to `root/relative`, creating parent directories
fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn keys(graph: &depwalk::DependencyGraph) -> Vec<PathBuf> {
    graph.paths().map(Path::to_path_buf).collect()
}

/// index.js -> ./a -> ./b, index.js -> ./c
fn create_chain() -> TempDir {
    let dir = tempdir().unwrap();
    write(dir.path(), "index.js", "import './a';\nimport './c';\nimport React from 'react';");
    write(dir.path(), "a.js", "const b = require('./b');");
    write(dir.path(), "b.js", "export const b = 1;");
    write(dir.path(), "c.js", "export * from './b';");
    dir
}

#[test]
fn test_preorder_first_visit_order() {
    let dir = create_chain();
    let root = dir.path();

    let graph = GraphBuilder::with_defaults()
        .build_entry(root.join("index.js"), &BuildOptions::new())
        .unwrap();

    assert_eq!(
        keys(&graph),
        vec![root.join("index.js"), root.join("a.js"), root.join("b.js"), root.join("c.js")]
    );

    let index = graph.get(root.join("index.js")).unwrap();
    assert_eq!(index.modules, vec!["react".to_string()]);
    assert_eq!(index.relatives, vec![root.join("a.js"), root.join("c.js")]);

    // b.js is reached twice but recorded once, with no dependencies
    assert!(graph.get(root.join("b.js")).unwrap().is_empty());
}

#[test]
fn test_repeated_builds_are_identical() {
    let dir = create_chain();
    let builder = GraphBuilder::with_defaults();
    let entry = dir.path().join("index.js");

    let first = builder.build_entry(entry.as_path(), &BuildOptions::new()).unwrap();
    let second = builder.build_entry(entry.as_path(), &BuildOptions::new()).unwrap();

    assert_eq!(keys(&first), keys(&second));
    assert_eq!(first, second);
}

#[test]
fn test_jsx_fallback() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "index.js", "import a from './lib/a';");
    let jsx = write(dir.path(), "lib/a.jsx", "export default () => <div />;");

    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &BuildOptions::new()).unwrap();

    let dep = &graph.get(&index).unwrap().dependencies[0];
    assert_eq!(dep.raw, "./lib/a");
    assert_eq!(dep.dialect, Dialect::Script);
    assert_eq!(dep.target, DependencyTarget::File(jsx.clone()));
    assert!(graph.contains(&jsx));
}

#[test]
fn test_unresolved_reference_aborts_build() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "index.js", "import './a';");
    let a = write(dir.path(), "a.js", "import 'react';\nimport './missing';");

    match GraphBuilder::with_defaults().build_entry(index.as_path(), &BuildOptions::new()) {
        Err(WalkerError::UnresolvedReference { specifier, parent, .. }) => {
            assert_eq!(specifier, "./missing");
            assert_eq!(parent, a);
        }
        other => panic!("Expected UnresolvedReference, got {:?}", other),
    }
}

#[test]
fn test_depth_one_records_only_entries() {
    let dir = create_chain();
    let root = dir.path();
    let options = BuildOptions::new().with_max_depth(Some(1));

    let graph = GraphBuilder::with_defaults().build_entry(root.join("index.js"), &options).unwrap();

    assert_eq!(keys(&graph), vec![root.join("index.js")]);
    assert_eq!(
        graph.get(root.join("index.js")).unwrap().relatives,
        vec![root.join("a.js"), root.join("c.js")]
    );
}

#[test]
fn test_depth_two() {
    let dir = create_chain();
    let root = dir.path();
    let options = BuildOptions::new().with_max_depth(Some(2));

    let graph = GraphBuilder::with_defaults().build_entry(root.join("index.js"), &options).unwrap();

    assert_eq!(keys(&graph), vec![root.join("index.js"), root.join("a.js"), root.join("c.js")]);
}

#[test]
fn test_filter_runs_before_resolution() {
    let dir = tempdir().unwrap();
    let index = write(
        dir.path(),
        "index.js",
        "import './missing';\nimport 'virtual:routes';\nimport 'react';",
    );

    let options = BuildOptions::new()
        .with_filter(|raw: &str, _parent: &Path| raw != "./missing" && !raw.starts_with("virtual:"));
    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &options).unwrap();

    let record = graph.get(&index).unwrap();
    assert_eq!(record.dependencies.len(), 1);
    assert_eq!(record.modules, vec!["react".to_string()]);
    assert!(record.relatives.is_empty());
}

#[test]
fn test_cycle_visits_each_file_once() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.js", "import './b';");
    let b = write(dir.path(), "b.js", "import './a';");

    let graph = GraphBuilder::with_defaults().build_entry(a.as_path(), &BuildOptions::new()).unwrap();

    assert_eq!(keys(&graph), vec![a.clone(), b.clone()]);
    assert_eq!(graph.get(&b).unwrap().relatives, vec![a]);
}

#[test]
fn test_self_import() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.js", "import './a.js';");

    let graph = GraphBuilder::with_defaults().build_entry(a.as_path(), &BuildOptions::new()).unwrap();

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.get(&a).unwrap().relatives, vec![a.clone()]);
}

#[test]
fn test_multiple_entries_share_visited_set() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.js", "import './shared';");
    write(root, "c.js", "import './shared';\nimport 'lodash';");
    write(root, "shared.js", "export default 1;");

    let graph = GraphBuilder::with_defaults()
        .build([root.join("a.js"), root.join("c.js")], &BuildOptions::new())
        .unwrap();

    assert_eq!(keys(&graph), vec![root.join("a.js"), root.join("shared.js"), root.join("c.js")]);
    assert_eq!(graph.modules(), vec!["lodash"]);
}

#[test]
fn test_entry_with_no_dependencies_is_recorded() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "index.js", "console.log('hi');");

    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &BuildOptions::new()).unwrap();

    assert_eq!(keys(&graph), vec![index.clone()]);
    assert!(graph.get(&index).unwrap().is_empty());
}

#[test]
fn test_virtual_entry_is_never_read_or_written() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.js", "export const a = 1;");
    let unsaved = dir.path().join("unsaved.js");

    let graph = GraphBuilder::with_defaults()
        .build_entry(Entry::source(&unsaved, "import { a } from './a';"), &BuildOptions::new())
        .unwrap();

    assert_eq!(keys(&graph), vec![unsaved.clone(), a]);
    assert!(!unsaved.exists());
}

#[test]
fn test_module_identity() {
    let dir = tempdir().unwrap();
    let index = write(
        dir.path(),
        "index.js",
        "import '@scope/x/y.json';\nconst fp = require('~lodash/fp');\nimport 'pkg/sub/path';\nimport '@scope/x';",
    );

    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &BuildOptions::new()).unwrap();
    let record = graph.get(&index).unwrap();

    assert_eq!(record.modules, vec!["@scope/x", "lodash", "pkg"]);
    // one dependency per specifier, repeats of a module included
    assert_eq!(record.dependencies.len(), 4);
    assert_eq!(record.dependencies[1].name, "lodash/fp");
}

#[test]
fn test_distinct_specifiers_to_same_file_are_all_listed() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "index.js", "import './a';\nimport './a.js';");
    let a = write(dir.path(), "a.js", "");

    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &BuildOptions::new()).unwrap();
    let record = graph.get(&index).unwrap();

    assert_eq!(record.dependencies.len(), 2);
    assert_eq!(record.relatives, vec![a]);
}

#[test]
fn test_candidate_order_script() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "index.js", "import './lib/a';");
    let js = write(dir.path(), "lib/a.js", "");
    write(dir.path(), "lib/a.jsx", "");

    let builder = GraphBuilder::with_defaults();
    let graph = builder.build_entry(index.as_path(), &BuildOptions::new()).unwrap();
    assert_eq!(graph.get(&index).unwrap().relatives, vec![js]);

    // an extensionless file of the exact name beats every suffix
    let literal = write(dir.path(), "lib/a", "");
    let graph = builder.build_entry(index.as_path(), &BuildOptions::new()).unwrap();
    assert_eq!(graph.get(&index).unwrap().relatives, vec![literal]);
}

#[test]
fn test_candidate_order_style_partials() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "css/index.scss", "@import 'a';\n@import 'b';");
    let a = write(dir.path(), "css/a.scss", "");
    write(dir.path(), "css/_a.scss", "");
    let b = write(dir.path(), "css/_b.scss", "@import '~bootstrap/scss/grid';");

    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &BuildOptions::new()).unwrap();

    assert_eq!(graph.get(&index).unwrap().relatives, vec![a, b.clone()]);
    assert_eq!(graph.get(&b).unwrap().modules, vec!["bootstrap"]);
    assert_eq!(graph.get(&b).unwrap().dependencies[0].dialect, Dialect::Style);
}

#[test]
fn test_plain_css_has_no_partials() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "index.css", "@import 'theme';");
    write(dir.path(), "_theme.css", "");

    let result = GraphBuilder::with_defaults().build_entry(index.as_path(), &BuildOptions::new());
    assert!(matches!(result, Err(WalkerError::UnresolvedReference { .. })));
}

#[test]
fn test_unanalyzable_dependency_gets_empty_record() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "index.js", "import logo from './logo.svg';");
    let logo = write(dir.path(), "logo.svg", "<svg>not javascript</svg>");

    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &BuildOptions::new()).unwrap();

    assert_eq!(keys(&graph), vec![index, logo.clone()]);
    assert!(graph.get(&logo).unwrap().is_empty());
}

#[test]
fn test_custom_resolve_hook_delegates_to_default() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "src/app/index.js", "import '#util';\nimport 'react';");
    let util = write(dir.path(), "src/app/util.js", "");

    let options = BuildOptions::new().with_resolve(
        |raw: &str, _parent: &Path, default: &dyn Fn(&str) -> String| match raw.strip_prefix('#') {
            Some(rest) => default(&format!("./{}", rest)),
            None => default(raw),
        },
    );
    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &options).unwrap();

    let record = graph.get(&index).unwrap();
    assert_eq!(record.relatives, vec![util]);
    assert_eq!(record.modules, vec!["react"]);
}

#[test]
fn test_alias_hook() {
    let dir = tempdir().unwrap();
    let index = write(dir.path(), "src/app/index.js", "import '@/util';\nimport 'ui/button';");
    let util = write(dir.path(), "src/util.js", "");

    let aliases = IndexMap::from([
        ("@/".to_string(), "./src/".to_string()),
        ("ui".to_string(), "@corp/ui".to_string()),
    ]);
    let options = BuildOptions::new().with_resolve(depwalk::AliasHook::new(&aliases, dir.path()).unwrap());
    let graph = GraphBuilder::with_defaults().build_entry(index.as_path(), &options).unwrap();

    let record = graph.get(&index).unwrap();
    assert_eq!(record.relatives, vec![util]);
    assert_eq!(record.modules, vec!["@corp/ui"]);
    assert_eq!(record.dependencies[0].name, "../util");
}

#[test]
fn test_missing_entry_is_io_error() {
    let dir = tempdir().unwrap();
    let result = GraphBuilder::with_defaults().build_entry(dir.path().join("nope.js"), &BuildOptions::new());
    assert!(matches!(result, Err(WalkerError::IoRead { .. })));
}
