use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn codescan() -> Command {
    let mut cmd = Command::cargo_bin("codescan").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "warn")
        .env_remove("CODESCAN_REPO_DIR")
        .arg("--config")
        .arg(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/config.toml"));
    cmd
}

fn sample_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("src/main.rs"),
        "fn main() {\n    // TODO: wire config\n    run();\n}\n",
    )
    .unwrap();
    fs::write(root.join("app.py"), "def run():\n    pass  # todo\n").unwrap();
    fs::write(root.join("notes.md"), "nothing here\n").unwrap();
    temp_dir
}

#[test]
fn keyword_search_prints_matches() {
    let repo = sample_repo();

    codescan()
        .arg("keyword")
        .arg("todo")
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 matches"))
        .stdout(predicate::str::contains("TODO: wire config"));
}

#[test]
fn keyword_search_json_with_type_filter() -> Result<(), Box<dyn std::error::Error>> {
    let repo = sample_repo();

    let output = codescan()
        .args(["keyword", "todo", "--type", "python", "--format", "json"])
        .arg(repo.path())
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let matches = value.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["path"], "app.py");
    assert_eq!(matches[0]["line_number"], 2);
    assert_eq!(matches[0]["context"]["before"][0]["content"], "def run():");
    Ok(())
}

#[test]
fn snippet_search_with_escapes() -> Result<(), Box<dyn std::error::Error>> {
    let repo = sample_repo();

    let output = codescan()
        .args(["snippet", "--escapes", r"wire config\n    run", "--format", "json"])
        .arg(repo.path())
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value[0]["line_number"], 2);
    assert_eq!(
        value[0]["context"]["match"]["content"],
        "    // TODO: wire config\n    run();"
    );
    Ok(())
}

#[test]
fn max_results_caps_output() -> Result<(), Box<dyn std::error::Error>> {
    let repo = sample_repo();

    let output = codescan()
        .args(["regex", r"^\s+\S", "-m", "1", "--format", "json"])
        .arg(repo.path())
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value.as_array().unwrap().len(), 1);
    Ok(())
}

#[test]
fn invalid_regex_fails() {
    let repo = sample_repo();

    codescan()
        .args(["regex", "(unclosed"])
        .arg(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pattern"));
}

#[test]
fn missing_root_fails() {
    let repo = sample_repo();

    codescan()
        .args(["keyword", "x"])
        .arg(repo.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn no_matches_is_not_an_error() {
    let repo = sample_repo();

    codescan()
        .args(["keyword", "zzz-not-present"])
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No matches found"));
}

#[test]
fn tree_respects_depth() -> Result<(), Box<dyn std::error::Error>> {
    let repo = sample_repo();

    let output = codescan()
        .args(["tree", "--max-depth", "1", "--format", "json"])
        .arg(repo.path())
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["type"], "directory");
    let children = value["children"].as_array().unwrap();
    let names: Vec<_> = children.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["app.py", "notes.md", "src"]);
    assert_eq!(children[2]["children"].as_array().unwrap().len(), 0);
    Ok(())
}

#[test]
fn repo_flag_resolves_under_repo_dir() {
    let base = TempDir::new().unwrap();
    let checkout = base.path().join("octo_demo");
    fs::create_dir_all(&checkout).unwrap();
    fs::write(checkout.join("lib.rs"), "pub fn marker() {}\n").unwrap();

    codescan()
        .env("CODESCAN_REPO_DIR", base.path())
        .args(["keyword", "marker", "--repo", "octo/demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lib.rs"));

    codescan()
        .env("CODESCAN_REPO_DIR", base.path())
        .args(["keyword", "marker", "--repo", "../etc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid repository"));
}

#[test]
fn types_lists_tags() {
    codescan()
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("python"))
        .stdout(predicate::str::contains(".py"));
}

#[test]
fn ignore_case_overrides_configured_case_sensitivity() -> Result<(), Box<dyn std::error::Error>> {
    let repo = sample_repo();
    let config_dir = TempDir::new()?;
    let config = config_dir.path().join("config.toml");
    fs::write(&config, "[search]\ncase_sensitive = true\n")?;

    let count = |extra: &[&str]| -> Result<usize, Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("codescan")?
            .env("NO_COLOR", "1")
            .env("RUST_LOG", "warn")
            .arg("--config")
            .arg(&config)
            .args(["keyword", "todo", "--format", "json"])
            .args(extra)
            .arg(repo.path())
            .output()?;
        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        Ok(value.as_array().map_or(0, Vec::len))
    };

    assert_eq!(count(&[])?, 1);
    assert_eq!(count(&["--ignore-case"])?, 2);
    Ok(())
}
