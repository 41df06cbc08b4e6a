//! Exit status of the `gasnet-convert` binary.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_gasnet-convert");

fn demo_folder() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/model6ss_test_0")
}

/// Copy the demo model, leaving out `skip`.
fn copy_demo(skip: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    for entry in fs::read_dir(demo_folder()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_owned();
        if skip.is_some_and(|s| name == s) {
            continue;
        }
        fs::copy(&path, dir.path().join(name)).unwrap();
    }
    dir
}

fn run(input: &Path, output: &Path) -> std::process::Output {
    Command::new(BIN)
        .arg("--datapath")
        .arg(input)
        .arg("--outputfolder")
        .arg(output)
        .arg("--jsonfile")
        .arg("model.json")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_success_exits_zero() {
    let input = copy_demo(None);
    let output = TempDir::new().unwrap();

    let result = run(input.path(), output.path());

    assert!(result.status.success());
    assert!(output.path().join("model.json").exists());
}

#[test]
fn test_missing_file_exits_non_zero() {
    let input = copy_demo(Some("input_network_pipes.csv"));
    let output = TempDir::new().unwrap();

    let result = run(input.path(), output.path());

    assert!(!result.status.success());
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("input_network_pipes.csv"));
    assert!(!output.path().join("model.json").exists());
}

#[test]
fn test_unknown_file_override_exits_non_zero() {
    let input = copy_demo(None);
    let output = TempDir::new().unwrap();

    let result = Command::new(BIN)
        .arg("--datapath")
        .arg(input.path())
        .arg("--outputfolder")
        .arg(output.path())
        .arg("--file")
        .arg("valves=valves.csv")
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
}
