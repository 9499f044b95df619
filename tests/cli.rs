use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{tempdir, TempDir};

fn write_file(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn create_package() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let root = dir.path().join("src/griddy");

    write_file(&root.join("__init__.py"), "\"\"\"Griddy SDK.\"\"\"\n");
    write_file(&root.join("auth/__init__.py"), "");
    write_file(&root.join("auth/token.py"), "def refresh(): ...\n");
    write_file(&root.join("_internal/helpers.py"), "");
    write_file(&root.join("tests/test_client.py"), "");

    (dir, root)
}

fn refdoc(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_refdoc"));
    // Keep ./refdoc.toml discovery away from the developer's checkout.
    cmd.current_dir(dir);
    cmd
}

#[test]
fn cli_generate_writes_pages_manifest_and_edit_paths() {
    let (dir, root) = create_package();
    let out = dir.path().join("docs");

    let output = refdoc(dir.path())
        .args(["generate", root.to_str().unwrap(), "--out", out.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());

    let base = out.join("sdk-reference/python");
    let token = fs::read_to_string(base.join("auth/token.md")).unwrap();
    assert_eq!(
        token,
        "# Token\n\n*[auth](index.md) / **token***\n\n::: griddy.auth.token\n"
    );

    let index = fs::read_to_string(base.join("index.md")).unwrap();
    assert!(index.starts_with("# Griddy\n\n::: griddy\n"));

    assert!(!base.join("tests/test_client.md").exists());
    assert!(!base.join("_internal/helpers.md").exists());

    let summary = fs::read_to_string(base.join("SUMMARY.md")).unwrap();
    assert_eq!(
        summary,
        "* [index](index.md)\n* [auth](auth/index.md)\n    * [token](auth/token.md)\n"
    );

    let edit_paths: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join(".edit-paths.json")).unwrap()).unwrap();
    assert_eq!(
        edit_paths["sdk-reference/python/auth/token.md"],
        "griddy/auth/token.py"
    );
}

#[test]
fn cli_generate_dry_run_writes_nothing() {
    let (dir, root) = create_package();
    let out = dir.path().join("docs");

    let output = refdoc(dir.path())
        .args([
            "generate",
            root.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--dry-run",
            "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(!out.exists());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["package"], "griddy");
    assert_eq!(v["pages"].as_array().unwrap().len(), 3);
    assert_eq!(v["skipped"].as_array().unwrap().len(), 2);
}

#[test]
fn cli_plan_respects_overrides_and_config() {
    let (dir, root) = create_package();
    write_file(
        &dir.path().join("refdoc.toml"),
        "package = \"griddy_sdk\"\nmanual-overrides = [\"auth/index.md\"]\n\n[titles]\ntoken = \"Access Tokens\"\n",
    );

    let output = refdoc(dir.path())
        .args(["plan", root.to_str().unwrap(), "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let pages = v["pages"].as_array().unwrap();
    let docs: Vec<&str> = pages
        .iter()
        .map(|p| p["doc_path"].as_str().unwrap())
        .collect();

    assert_eq!(docs, vec!["index.md", "auth/token.md"]);
    assert_eq!(pages[1]["title"], "Access Tokens");
    assert_eq!(pages[1]["identifier"], "griddy_sdk.auth.token");
    assert_eq!(v["overridden"][0]["doc_path"], "auth/index.md");
}

#[test]
fn cli_nav_prints_manifest() {
    let (dir, root) = create_package();

    let output = refdoc(dir.path())
        .args(["nav", root.to_str().unwrap()])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("    * [token](auth/token.md)\n"));
}

#[test]
fn cli_duplicate_nav_key_fails() {
    let (dir, root) = create_package();
    write_file(&root.join("auth.py"), "");

    let output = refdoc(dir.path())
        .args(["plan", root.to_str().unwrap()])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(7));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("duplicate navigation key"));
}

#[test]
fn cli_json_error_output_is_valid_json_even_with_quotes_in_path() {
    let dir = tempdir().unwrap();

    let bad_path = dir.path().join("does-not-exist-\"quoted\"");

    let output = refdoc(dir.path())
        .args(["plan", bad_path.to_str().unwrap(), "--json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));

    let stderr = String::from_utf8(output.stderr).unwrap();
    let _: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
}
