//! CLI command tests, driving the built binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn cargo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_scorepack"))
}

fn run(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .output()
        .expect("binary should run")
}

fn write_package(root: &Path, version: &str) {
    let score = format!(
        r#"<scoreDocument version="{version}">
             <programVersion>4.1.1</programVersion>
             <Score>
               <Division>480</Division>
               <Part>
                 <trackName>Violin</trackName>
                 <Staff id="s1"><Measure number="1"/></Staff>
               </Part>
             </Score>
           </scoreDocument>"#
    );
    fs::write(root.join("score.xml"), score).unwrap();
    fs::create_dir(root.join("excerpts")).unwrap();
    fs::write(
        root.join("excerpts/Part1.xml"),
        r#"<scoreDocument version="4.10">
             <Score>
               <Part><Staff link="s1"><Measure number="1"/></Staff></Part>
             </Score>
           </scoreDocument>"#,
    )
    .unwrap();
}

#[test]
fn test_check_reports_ok_for_a_loadable_package() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "4.10");

    let output = run(&["check", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ok"), "stdout: {stdout}");
}

#[test]
fn test_check_fails_for_an_unsupported_version() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "9.99");

    let output = run(&["check", dir.path().to_str().unwrap()]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("failed"), "stdout: {stdout}");

    // The same package passes when version errors are suppressed.
    let output = run(&[
        "check",
        dir.path().to_str().unwrap(),
        "--ignore-version-error",
    ]);
    assert!(output.status.success());
}

#[test]
fn test_inspect_json_summarizes_the_document() {
    let dir = tempfile::tempdir().unwrap();
    write_package(dir.path(), "4.10");

    let output = run(&["inspect", dir.path().to_str().unwrap(), "--json"]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["version"], 410);
    assert_eq!(summary["program_version"], "4.1.1");
    assert_eq!(summary["excerpts"][0], "Part1");
    assert_eq!(summary["has_audio"], false);
}
