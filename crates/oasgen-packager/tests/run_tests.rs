use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use oasgen_core::config::UnsupportedVerbPolicy;
use oasgen_packager::{RunError, RunOptions, run};

const VOTES: &str = include_str!("fixtures/votes.yaml");
const VOTES_JSON: &str = include_str!("fixtures/votes.json");
const MISSING_INFO: &str = include_str!("fixtures/missing-info.yaml");

fn options_for(dir: &Path, name: &str, content: &str) -> RunOptions {
    fs::write(dir.join(name), content).unwrap();
    let mut options = RunOptions::new(name);
    options.base_dir = dir.to_path_buf();
    options
}

fn archive_files(archive: &Path) -> Vec<String> {
    let mut tar = tar::Archive::new(GzDecoder::new(File::open(archive).unwrap()));
    tar.entries()
        .unwrap()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.header().entry_type().is_file())
        .map(|entry| entry.path().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn workspace_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn run_produces_archive_and_removes_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let report = run(&options_for(tmp.path(), "votes.yaml", VOTES)).unwrap();

    assert_eq!(report.operations, 3);
    assert_eq!(report.controllers, 2);
    assert!(!report.installed);
    assert!(!report.kept_directory);
    assert!(report.skipped.is_empty());
    assert!(!report.output_dir.exists());
    assert_eq!(
        report.archive,
        tmp.path().join("nodejs-server-generated.tar.gz")
    );

    assert_eq!(
        workspace_entries(tmp.path()),
        vec!["nodejs-server-generated.tar.gz", "votes.yaml"]
    );

    let files = archive_files(&report.archive);
    assert_eq!(files.len(), report.files);
    for expected in [
        "nodejs-server-generated/.oas-generator-ignore",
        "nodejs-server-generated/.oas-generator/VERSION",
        "nodejs-server-generated/README.md",
        "nodejs-server-generated/api/oas-doc.yaml",
        "nodejs-server-generated/controllers/resultsController.js",
        "nodejs-server-generated/controllers/resultsControllerService.js",
        "nodejs-server-generated/controllers/votesController.js",
        "nodejs-server-generated/controllers/votesControllerService.js",
        "nodejs-server-generated/index.js",
        "nodejs-server-generated/package.json",
        "nodejs-server-generated/utils/writer.js",
    ] {
        assert!(files.iter().any(|f| f == expected), "missing {expected}");
    }
}

#[test]
fn archived_document_is_the_input() {
    let tmp = tempfile::tempdir().unwrap();
    let report = run(&options_for(tmp.path(), "votes.yaml", VOTES)).unwrap();

    let mut tar = tar::Archive::new(GzDecoder::new(File::open(&report.archive).unwrap()));
    let mut doc = String::new();
    for entry in tar.entries().unwrap() {
        let mut entry = entry.unwrap();
        if entry.path().unwrap() == Path::new("nodejs-server-generated/api/oas-doc.yaml") {
            entry.read_to_string(&mut doc).unwrap();
        }
    }
    assert_eq!(doc, VOTES);
}

#[test]
fn keep_directory_leaves_project_on_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let mut options = options_for(tmp.path(), "votes.yaml", VOTES);
    options.config.package.keep_directory = true;
    options.config.output = "voting-server".to_string();

    let report = run(&options).unwrap();
    assert!(report.kept_directory);
    assert_eq!(report.output_dir, tmp.path().join("voting-server"));
    assert!(tmp.path().join("voting-server.tar.gz").is_file());

    let votes = fs::read_to_string(report.output_dir.join("controllers/votesController.js")).unwrap();
    assert_eq!(votes.matches("require('./votesControllerService')").count(), 1);
    assert_eq!(votes.matches("module.exports.").count(), 2);
}

#[test]
fn json_input_is_supported() {
    let tmp = tempfile::tempdir().unwrap();
    let report = run(&options_for(tmp.path(), "votes.json", VOTES_JSON)).unwrap();
    assert!(report.archive.is_file());
    assert!(report.operations > 0);
}

#[test]
fn invalid_document_produces_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let err = run(&options_for(tmp.path(), "broken.yaml", MISSING_INFO)).unwrap_err();

    match &err {
        RunError::SpecValidation { path, source } => {
            assert!(path.ends_with("broken.yaml"));
            assert!(
                source
                    .issues
                    .iter()
                    .any(|issue| issue.pointer.is_empty() && issue.message.contains("info"))
            );
        }
        other => panic!("expected a validation error, got {other}"),
    }
    assert_eq!(workspace_entries(tmp.path()), vec!["broken.yaml"]);
}

#[test]
fn unreadable_input_is_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let mut options = RunOptions::new("absent.yaml");
    options.base_dir = tmp.path().to_path_buf();

    let err = run(&options).unwrap_err();
    assert!(matches!(err, RunError::SpecRead { .. }));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let err = run(&options_for(tmp.path(), "bad.yaml", "openapi: [3.0.0\n")).unwrap_err();
    assert!(matches!(err, RunError::SpecParse { .. }));
    assert_eq!(workspace_entries(tmp.path()), vec!["bad.yaml"]);
}

#[test]
fn existing_output_is_not_overwritten() {
    let tmp = tempfile::tempdir().unwrap();
    let existing = tmp.path().join("nodejs-server-generated");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("notes.txt"), "hand written").unwrap();

    let options = options_for(tmp.path(), "votes.yaml", VOTES);
    let err = run(&options).unwrap_err();
    assert!(matches!(err, RunError::OutputExists { .. }));
    assert_eq!(
        fs::read_to_string(existing.join("notes.txt")).unwrap(),
        "hand written"
    );
    assert!(!tmp.path().join("nodejs-server-generated.tar.gz").exists());

    let mut forced = options.clone();
    forced.force = true;
    forced.config.package.keep_directory = true;
    run(&forced).unwrap();
    assert!(!existing.join("notes.txt").exists());
    assert!(existing.join("index.js").is_file());
}

#[test]
fn unsupported_verb_policy_fail_aborts_before_writing() {
    let yaml = r#"
openapi: 3.0.0
info:
  title: Voting API
  version: 1.0.0
paths:
  /votes/{id}:
    patch:
      responses:
        '200':
          description: changed
"#;
    let tmp = tempfile::tempdir().unwrap();

    let report = run(&options_for(tmp.path(), "skip.yaml", yaml)).unwrap();
    assert_eq!(report.operations, 0);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].method, "patch");
    fs::remove_file(&report.archive).unwrap();

    let mut options = options_for(tmp.path(), "fail.yaml", yaml);
    options.config.naming.unsupported_verb = UnsupportedVerbPolicy::Fail;
    let err = run(&options).unwrap_err();
    assert!(matches!(err, RunError::Transform { .. }));
    assert_eq!(workspace_entries(tmp.path()), vec!["fail.yaml", "skip.yaml"]);
}

#[test]
fn runs_are_byte_for_byte_reproducible() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = run(&options_for(first.path(), "votes.yaml", VOTES)).unwrap();
    let b = run(&options_for(second.path(), "votes.yaml", VOTES)).unwrap();
    assert_eq!(fs::read(&a.archive).unwrap(), fs::read(&b.archive).unwrap());
}

#[test]
fn packaging_failure_keeps_the_project_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("nodejs-server-generated.tar.gz");
    // A directory where the archive should go makes the final rename fail.
    fs::create_dir(&archive).unwrap();

    let err = run(&options_for(tmp.path(), "votes.yaml", VOTES)).unwrap_err();
    match &err {
        RunError::Packaging {
            archive: reported,
            directory,
            ..
        } => {
            assert_eq!(reported, &archive);
            assert_eq!(directory, &tmp.path().join("nodejs-server-generated"));
            assert!(directory.join("index.js").is_file());
        }
        other => panic!("expected a packaging error, got {other}"),
    }

    assert!(archive.is_dir());
    assert_eq!(fs::read_dir(&archive).unwrap().count(), 0);
    assert!(!tmp.path().join("nodejs-server-generated.tar.gz.partial").exists());
    assert_eq!(
        workspace_entries(tmp.path()),
        vec![
            "nodejs-server-generated",
            "nodejs-server-generated.tar.gz",
            "votes.yaml"
        ]
    );
}
