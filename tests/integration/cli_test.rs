//! Command-line tests driven through the library entry points

use clap::Parser;
use depwalk::cli::{Args, Command, Completion};
use depwalk::models::config::OutputFormat;
use depwalk::WalkerError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn run(argv: &[&str]) -> depwalk::Result<Completion> {
    let args = Args::try_parse_from(argv).unwrap();
    Command::from_args(args).execute()
}

#[test]
fn test_cli_args_parsing() {
    let args = Args::try_parse_from([
        "depwalk",
        "src/index.js",
        "--max-depth",
        "3",
        "--ignore",
        "virtual:*",
        "--alias",
        "@/=./src",
        "--output",
        "json",
        "--output-file",
        "deps.json",
        "--quiet",
    ])
    .unwrap();

    assert_eq!(args.paths, vec![PathBuf::from("src/index.js")]);
    assert_eq!(args.max_depth, Some(3));
    assert_eq!(args.ignore, vec!["virtual:*".to_string()]);
    assert_eq!(args.alias, vec![("@/".to_string(), "./src".to_string())]);
    assert_eq!(args.output_file, Some(PathBuf::from("deps.json")));
    assert!(args.quiet);
    assert!(!args.verbose);
}

#[test]
fn test_graph_command_writes_json() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let config = write(root, "depwalk.toml", "ignore_patterns = [\"*.svg\"]\n");
    let index = write(root, "src/index.js", "import './a';\nimport logo from './logo.svg';\nimport 'react';");
    write(root, "src/a.js", "export * from 'lodash';");
    let out = root.join("deps.json");

    let completion = run(&[
        "depwalk",
        index.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--output",
        "json",
        "--output-file",
        out.to_str().unwrap(),
    ])
    .unwrap();
    assert_eq!(completion, Completion::Clean);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let files = json.as_object().unwrap();
    assert_eq!(files.len(), 2);

    let record = &json[index.to_str().unwrap()];
    // the svg import is dropped by the configured ignore glob
    assert_eq!(record["dependencies"].as_array().unwrap().len(), 2);
    assert_eq!(record["modules"], serde_json::json!(["react"]));
}

#[test]
fn test_scan_command_writes_csv() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let config = write(root, "depwalk.toml", "match_patterns = [\"js/*.js\"]\n");
    write(root, "src/js/index.js", "import './b';\nimport 'lodash';");
    write(root, "src/css/index.scss", "@import 'a';");
    let out = root.join("scan.csv");

    run(&[
        "depwalk",
        "--scan",
        root.join("src").to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
        "-o",
        "csv",
        "--output-file",
        out.to_str().unwrap(),
    ])
    .unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "path,specifier\njs/index.js,./b\njs/index.js,lodash\n"
    );
}

#[test]
fn test_scan_rejects_dot_output() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let config = write(root, "depwalk.toml", "");
    write(root, "src/index.js", "import 'react';");

    let result = run(&[
        "depwalk",
        "--scan",
        root.join("src").to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
        "-o",
        "dot",
        "--output-file",
        root.join("scan.dot").to_str().unwrap(),
    ]);

    match result {
        Err(err) => {
            assert!(matches!(err, WalkerError::InvalidOutputFormat { .. }));
            assert!(err.is_critical());
        }
        Ok(_) => panic!("dot output should be rejected for scans"),
    }
}

#[test]
fn test_keep_going_reports_partial_completion() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let config = write(root, "depwalk.toml", "");
    let good = write(root, "good.js", "import 'react';");
    let bad = write(root, "bad.js", "import './missing';");
    let out = root.join("deps.txt");

    let argv = [
        "depwalk",
        bad.to_str().unwrap(),
        good.to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
        "--no-colors",
        "--output-file",
        out.to_str().unwrap(),
    ];

    // without --keep-going the first failure aborts everything
    assert!(matches!(run(&argv), Err(WalkerError::UnresolvedReference { .. })));
    assert!(!out.exists());

    let mut keep_going = argv.to_vec();
    keep_going.push("--keep-going");
    assert_eq!(run(&keep_going).unwrap(), Completion::Partial(1));

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("good.js"));
    assert!(!text.contains("bad.js"));
}

#[test]
fn test_config_file_output_format_is_used() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let config = write(root, "depwalk.toml", "output_format = \"dot\"\n");
    let index = write(root, "index.js", "import 'react';");
    let out = root.join("deps.dot");

    run(&[
        "depwalk",
        index.to_str().unwrap(),
        "-c",
        config.to_str().unwrap(),
        "--output-file",
        out.to_str().unwrap(),
    ])
    .unwrap();

    let dot = fs::read_to_string(&out).unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("react"));
}

#[test]
fn test_output_format_values() {
    for (value, expected) in [
        ("text", OutputFormat::Text),
        ("json", OutputFormat::Json),
        ("csv", OutputFormat::Csv),
        ("dot", OutputFormat::Dot),
    ] {
        assert_eq!(value.parse::<OutputFormat>().unwrap(), expected);
    }
}
