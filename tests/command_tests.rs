use script_treemap::commands::{execute_build, resolve_duplicates, validate_args, BuildArgs};
use script_treemap::output::read_report;
use script_treemap::parser::parse_artifacts;
use script_treemap::treemap::DuplicateDetector;
use script_treemap::utils::config::SCHEMA_VERSION;
use serde_json::json;
use std::path::PathBuf;

fn artifacts_json() -> serde_json::Value {
    json!({
        "finalUrl": "https://shop.test/",
        "scripts": [
            { "src": "https://shop.test/app.js" },
            { "content": "init();" },
            { "src": "https://shop.test/vendor.js" },
            { "src": "https://cdn.test/tag.js" }
        ],
        "bundles": {
            "https://shop.test/app.js": {
                "sourceRoot": "",
                "files": {
                    "src/app.js": 300,
                    "node_modules/lodash/lodash.js": 700
                }
            },
            "https://shop.test/vendor.js": {
                "files": {
                    "node_modules/lodash/lodash.js": 650,
                    "node_modules/react/index.js": 350
                }
            }
        },
        "coverage": {
            "https://shop.test/app.js": [{ "startOffset": 0, "endOffset": 10, "count": 1 }],
            "https://shop.test/vendor.js": [{ "startOffset": 0, "endOffset": 10, "count": 1 }]
        },
        "unusedSummaries": {
            "https://shop.test/app.js": {
                "totalBytes": 1000,
                "wastedBytes": 400,
                "sourcesWastedBytes": { "node_modules/lodash/lodash.js": 400 }
            },
            "https://shop.test/vendor.js": {
                "totalBytes": 1000,
                "wastedBytes": 100,
                "sourcesWastedBytes": { "node_modules/react/index.js": 100 }
            }
        }
    })
}

#[test]
fn test_validate_args_valid() {
    let args = BuildArgs {
        input: PathBuf::from("artifacts.json"),
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_output() {
    let args = BuildArgs {
        output: PathBuf::new(),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_top_sources_too_large() {
    let args = BuildArgs {
        top_sources: 2000,
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_execute_build_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("artifacts.json");
    let output = dir.path().join("out/treemap.json");
    std::fs::write(&input, artifacts_json().to_string()).unwrap();

    let args = BuildArgs {
        input,
        output: output.clone(),
        print_summary: true,
        ..Default::default()
    };
    let report = execute_build(&args).unwrap();

    let loaded = read_report(&output).unwrap();
    assert_eq!(loaded.version, SCHEMA_VERSION);
    assert_eq!(loaded.nodes, report.nodes);

    let names: Vec<&str> = loaded.nodes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "https://shop.test/",
            "https://shop.test/app.js",
            "https://shop.test/vendor.js",
            "https://cdn.test/tag.js"
        ]
    );

    // Lodash ships in both bundles, so both leaves are tagged.
    let app = &loaded.nodes[1].node;
    assert_eq!(app.name, "");
    assert_eq!(app.children()[1].name, "node_modules/lodash/lodash.js");
    assert_eq!(
        app.children()[1].duplicate_key.as_deref(),
        Some("node_modules/lodash/lodash.js")
    );

    let vendor = &loaded.nodes[2].node;
    assert_eq!(vendor.name, "node_modules");
    assert_eq!(vendor.resource_bytes, 1000);
    assert_eq!(vendor.unused_bytes, Some(100));
    assert!(vendor.children()[0].duplicate_key.is_some());
    assert!(vendor.children()[1].duplicate_key.is_none());

    let tag = &loaded.nodes[3].node;
    assert_eq!(tag.resource_bytes, "https://cdn.test/tag.js".len() as u64);
}

#[test]
fn test_execute_build_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = BuildArgs {
        input: dir.path().join("missing.json"),
        output: dir.path().join("treemap.json"),
        ..Default::default()
    };

    assert!(execute_build(&args).is_err());
}

#[test]
fn test_explicit_duplicate_list_wins() {
    let mut raw = artifacts_json();
    raw["duplicatedModules"] = json!(["node_modules/react/index.js"]);
    let artifacts = parse_artifacts(&raw).unwrap();

    let dupes = resolve_duplicates(&artifacts);

    assert!(dupes.is_duplicated("node_modules/react/index.js"));
    assert!(!dupes.is_duplicated("node_modules/lodash/lodash.js"));
}
