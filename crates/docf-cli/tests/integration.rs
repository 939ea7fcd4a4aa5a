//! Integration tests for docf

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A docf command isolated from the user's config and scratch directory
fn docf_cmd(sandbox: &TempDir) -> Result<Command, Box<dyn std::error::Error>> {
    let config_path = sandbox.path().join("docf.toml");
    let scratch = sandbox.path().join("scratch");
    fs::create_dir_all(&scratch)?;
    if !config_path.exists() {
        fs::write(
            &config_path,
            format!("scratch-dir = {:?}\n", scratch.to_string_lossy()),
        )?;
    }

    let mut cmd = cargo_bin_cmd!("docf");
    cmd.env("DOCF_CONFIG", config_path);
    cmd.env_remove("DOCF_LOG");
    cmd.env("NO_COLOR", "1");
    Ok(cmd)
}

fn write_docs(root: &Path, files: &[(&str, &str)]) -> std::io::Result<()> {
    let docs = root.join("docs");
    fs::create_dir_all(&docs)?;
    for (name, content) in files {
        fs::write(docs.join(name), content)?;
    }
    Ok(())
}

fn scratch_entries(sandbox: &TempDir) -> std::io::Result<usize> {
    Ok(fs::read_dir(sandbox.path().join("scratch"))?.count())
}

#[test]
fn test_version() -> TestResult {
    let sandbox = TempDir::new()?;
    docf_cmd(&sandbox)?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docf"));
    Ok(())
}

#[test]
fn test_help() -> TestResult {
    let sandbox = TempDir::new()?;
    docf_cmd(&sandbox)?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Markdown documentation"));
    Ok(())
}

#[test]
fn test_invalid_command() -> TestResult {
    let sandbox = TempDir::new()?;
    docf_cmd(&sandbox)?.arg("invalid").assert().failure();
    Ok(())
}

#[test]
fn test_pack_then_open() -> TestResult {
    let sandbox = TempDir::new()?;
    let project = sandbox.path().join("MyProject");
    write_docs(&project, &[("README.md", "# Hello"), ("guide.md", "# Guide")])?;
    let output = sandbox.path().join("MyProject.docf");

    docf_cmd(&sandbox)?
        .arg("pack")
        .arg(&project)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: MyProject"))
        .stdout(predicate::str::contains("Entry: README.md"));

    assert!(output.is_file());
    assert!(!project.join("manifest.json").exists());

    docf_cmd(&sandbox)?
        .arg("open")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("MyProject"))
        .stdout(predicate::str::contains("guide.md"))
        .stdout(predicate::str::contains("# Hello"));

    assert_eq!(scratch_entries(&sandbox)?, 0);
    Ok(())
}

#[test]
fn test_open_keep_leaves_working_dir() -> TestResult {
    let sandbox = TempDir::new()?;
    let project = sandbox.path().join("Kept");
    write_docs(&project, &[("index.md", "# Index")])?;
    let output = sandbox.path().join("kept.docf");

    docf_cmd(&sandbox)?
        .arg("pack")
        .arg(&project)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    docf_cmd(&sandbox)?
        .args(["open", "--keep", "--no-content"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry: index.md"))
        .stdout(predicate::str::contains("# Index").not());

    assert_eq!(scratch_entries(&sandbox)?, 1);

    docf_cmd(&sandbox)?
        .args(["clean", "--all"])
        .assert()
        .success();
    assert_eq!(scratch_entries(&sandbox)?, 0);
    Ok(())
}

#[test]
fn test_clean_spares_user_directories() -> TestResult {
    let sandbox = TempDir::new()?;
    let checkout = sandbox.path().join("scratch").join("docf-cli");
    fs::create_dir_all(checkout.join("src"))?;
    fs::write(checkout.join("src").join("main.rs"), "fn main() {}")?;

    docf_cmd(&sandbox)?
        .args(["clean", "--all"])
        .assert()
        .success();

    assert!(checkout.join("src").join("main.rs").is_file());
    Ok(())
}

#[test]
fn test_pack_with_overrides() -> TestResult {
    let sandbox = TempDir::new()?;
    let project = sandbox.path().join("Overrides");
    write_docs(&project, &[("README.md", "# Hi"), ("start.md", "# Start")])?;
    let output = sandbox.path().join("out.docf");

    docf_cmd(&sandbox)?
        .arg("pack")
        .arg(&project)
        .arg("-o")
        .arg(&output)
        .args(["--title", "Custom", "--entry", "start.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Custom"))
        .stdout(predicate::str::contains("Entry: start.md"));
    Ok(())
}

#[test]
fn test_pack_without_docs_fails() -> TestResult {
    let sandbox = TempDir::new()?;
    let project = sandbox.path().join("Empty");
    fs::create_dir_all(&project)?;
    let output = sandbox.path().join("empty.docf");

    docf_cmd(&sandbox)?
        .arg("pack")
        .arg(&project)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("docs"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_validate_prints_manifest() -> TestResult {
    let sandbox = TempDir::new()?;
    let project = sandbox.path().join("Checked");
    write_docs(&project, &[("a.md", "# A")])?;

    docf_cmd(&sandbox)?
        .arg("validate")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"entryFile\": \"a.md\""))
        .stdout(predicate::str::contains("\"title\": \"Checked\""));
    Ok(())
}

#[test]
fn test_hostile_package() -> TestResult {
    let sandbox = TempDir::new()?;
    let package = sandbox.path().join("hostile.docf");
    {
        let mut zip = ZipWriter::new(fs::File::create(&package)?);
        let options = SimpleFileOptions::default();
        zip.start_file("manifest.json", options)?;
        zip.write_all(br#"{"title":"Hostile","entryFile":"README.md"}"#)?;
        zip.start_file("docs/README.md", options)?;
        zip.write_all(b"# Safe")?;
        zip.start_file("../evil.md", options)?;
        zip.write_all(b"escape")?;
        zip.start_file("docs/run.sh", options)?;
        zip.write_all(b"echo hi")?;
        zip.finish()?;
    }

    docf_cmd(&sandbox)?
        .arg("inspect")
        .arg(&package)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 entries, 2 would be skipped"));

    docf_cmd(&sandbox)?
        .arg("open")
        .arg(&package)
        .assert()
        .success()
        .stdout(predicate::str::contains("# Safe"))
        .stderr(predicate::str::contains("../evil.md"));

    assert!(!sandbox.path().join("evil.md").exists());
    Ok(())
}

#[test]
fn test_open_missing_package_fails() -> TestResult {
    let sandbox = TempDir::new()?;
    docf_cmd(&sandbox)?
        .arg("open")
        .arg(sandbox.path().join("missing.docf"))
        .assert()
        .failure();
    assert_eq!(scratch_entries(&sandbox)?, 0);
    Ok(())
}

#[test]
fn test_unpack_into_directory() -> TestResult {
    let sandbox = TempDir::new()?;
    let project = sandbox.path().join("Unpacked");
    write_docs(&project, &[("README.md", "# Hello")])?;
    let output = sandbox.path().join("unpacked.docf");
    let dest = sandbox.path().join("dest");

    docf_cmd(&sandbox)?
        .arg("pack")
        .arg(&project)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    docf_cmd(&sandbox)?
        .arg("unpack")
        .arg(&output)
        .arg("-d")
        .arg(&dest)
        .assert()
        .success();

    assert!(dest.join("manifest.json").is_file());
    assert_eq!(
        fs::read_to_string(dest.join("docs").join("README.md"))?,
        "# Hello"
    );
    Ok(())
}

#[test]
fn test_config_show() -> TestResult {
    let sandbox = TempDir::new()?;
    docf_cmd(&sandbox)?
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration:"))
        .stdout(predicate::str::contains("scratch-dir"));
    Ok(())
}

#[test]
fn test_config_path() -> TestResult {
    let sandbox = TempDir::new()?;
    docf_cmd(&sandbox)?
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docf.toml"));
    Ok(())
}

#[test]
fn test_config_set_rejects_bad_values() -> TestResult {
    let sandbox = TempDir::new()?;
    docf_cmd(&sandbox)?
        .args(["config", "set", "font-size", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("font-size"));

    docf_cmd(&sandbox)?
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));

    docf_cmd(&sandbox)?
        .args(["config", "set", "font-size", "large"])
        .assert()
        .success();

    let written = fs::read_to_string(sandbox.path().join("docf.toml"))?;
    assert!(written.contains("font-size = \"large\""));
    Ok(())
}

#[test]
fn test_config_unreadable_file_fails() -> TestResult {
    let sandbox = TempDir::new()?;
    fs::write(sandbox.path().join("docf.toml"), "scratch-dir = [")?;
    docf_cmd(&sandbox)?
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
    Ok(())
}
