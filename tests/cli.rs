//! Integration tests for the `refsync` binary and the child-process runner.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use refsync::watcher::{PipelineRunner, RunOutcome, SubprocessRunner};
use refsync::Config;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_refsync");

const CALC: &str = r"package a.b;

/** Computes totals. */
public class Calc {
    /** Adds two numbers. */
    public int sum(int x, int y) {
        return x + y;
    }
}
";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn generate(source: &Path, output: &Path) -> Output {
    Command::new(BIN)
        .env_remove("REFSYNC_LOG_JSON")
        .env_remove("RUST_LOG")
        .args(["--log-level", "error", "generate", "--source"])
        .arg(source)
        .arg("--output")
        .arg(output)
        .output()
        .unwrap()
}

/// `generate` reports the page count and exits 0.
#[test]
fn test_generate_prints_count() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("java");
    let out = tmp.path().join("reference");
    write(&src, "a/b/Calc.java", CALC);
    write(&src, "a/b/package-info.java", "package a.b;\n");

    let output = generate(&src, &out);

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Generated 1 reference pages."), "{stdout}");
    assert!(out.join("a/b/Calc.md").is_file());
}

/// An empty tree is not an error.
#[test]
fn test_generate_empty_tree() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("java");
    fs::create_dir_all(&src).unwrap();

    let output = generate(&src, &tmp.path().join("reference"));

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Generated 0 reference pages."), "{stdout}");
}

/// An uncreatable output root exits with status 1 and writes nothing.
#[test]
fn test_generate_output_root_failure_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("java");
    write(&src, "a/b/Calc.java", CALC);
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "regular file").unwrap();

    let output = generate(&src, &blocker.join("out"));

    assert_eq!(output.status.code(), Some(1), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("Generated"), "{stdout}");
}

/// Invalid configuration is rejected before anything runs.
#[test]
fn test_generate_same_roots_rejected() {
    let tmp = TempDir::new().unwrap();

    let output = generate(tmp.path(), tmp.path());

    assert_eq!(output.status.code(), Some(1), "{output:?}");
}

fn runner_config(src: &Path, out: &Path) -> Config {
    Config {
        source_root: src.to_path_buf(),
        output_root: out.to_path_buf(),
        log_level: "error".to_string(),
        ..Config::default()
    }
}

/// The watch loop's runner drives the real binary across the process boundary.
#[tokio::test]
async fn test_subprocess_runner_generates() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("java");
    let out = tmp.path().join("reference");
    write(&src, "a/b/Calc.java", CALC);

    let runner = SubprocessRunner::generate_with(BIN, &runner_config(&src, &out));

    assert_eq!(runner.run().await, RunOutcome::Succeeded);
    let doc = fs::read_to_string(out.join("a/b/Calc.md")).unwrap();
    assert!(doc.contains("fqcn: a.b.Calc"));
    assert!(doc.contains("- `sum(int x, int y)`"));
}

/// A failing child is reported as a failed run.
#[tokio::test]
async fn test_subprocess_runner_reports_failure() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("java");
    write(&src, "a/b/Calc.java", CALC);
    let blocker = tmp.path().join("blocker");
    fs::write(&blocker, "regular file").unwrap();

    let runner = SubprocessRunner::generate_with(BIN, &runner_config(&src, &blocker.join("out")));

    assert_eq!(runner.run().await, RunOutcome::Failed);
}
