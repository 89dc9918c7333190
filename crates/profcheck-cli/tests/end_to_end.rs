//! End-to-end tests: run the `profcheck` binary against a scratch schema
//! root and document tree, checking exit codes and console output.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    /// Schema root with a `v1` version: profiles require `name` and `spec.image`,
    /// legacies (draft-04) require an integer `id`.
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let v1 = dir.path().join("schemas/v1");
        std::fs::create_dir_all(&v1).unwrap();
        std::fs::write(
            v1.join("profiles.json"),
            json!({
                "type": "object",
                "required": ["name", "spec"],
                "properties": {
                    "name": {"type": "string"},
                    "spec": {
                        "type": "object",
                        "required": ["image"],
                        "properties": {"image": {"type": "string"}}
                    }
                }
            })
            .to_string(),
        )
        .unwrap();
        std::fs::write(
            v1.join("legacies.json"),
            json!({
                "$schema": "http://json-schema.org/draft-04/schema#",
                "type": "object",
                "required": ["id"],
                "properties": {"id": {"type": "integer"}}
            })
            .to_string(),
        )
        .unwrap();
        Self { dir }
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn doc(&self, rel: &str, content: &str) -> String {
        let path: PathBuf = self.root().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        rel.to_string()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_profcheck"))
            .args(args)
            .current_dir(self.root())
            .env("PROFCHECK_SCHEMA_ROOT", self.root().join("schemas"))
            .env_remove("PROFCHECK_SCHEMA_VERSION")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .expect("binary should run")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn valid_profile_exits_zero_with_success_message() {
    let ws = Workspace::new();
    let file = ws.doc("profiles/web.yaml", "name: web\nspec:\n  image: nginx\n");

    let output = ws.run(&[file.as_str()]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("All 1 file(s) are valid"));
}

#[test]
fn missing_required_field_exits_one_and_names_field() {
    let ws = Workspace::new();
    let file = ws.doc("profiles/web.yaml", "name: web\nspec: {}\n");

    let output = ws.run(&[file.as_str()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("1 of 1 file(s) failed validation"), "{out}");
    assert!(out.contains("profiles/web.yaml"), "{out}");
    assert!(
        out.lines().any(|l| l.starts_with("  - spec ") && l.contains("\"image\"")),
        "{out}"
    );
}

#[test]
fn unknown_property_is_reported_unless_loose() {
    let ws = Workspace::new();
    let file = ws.doc(
        "profiles/web.yaml",
        "name: web\nspec:\n  image: nginx\n  colour: red\n",
    );

    let tight = ws.run(&[file.as_str()]);
    assert_eq!(tight.status.code(), Some(1));
    assert!(stdout(&tight).contains("  - .spec.colour is not a thing"));

    let loose = ws.run(&["--loose", file.as_str()]);
    assert_eq!(loose.status.code(), Some(0), "stderr: {}", stderr(&loose));
}

#[test]
fn mixed_kinds_and_parse_errors() {
    let ws = Workspace::new();
    let profile = ws.doc("profiles/web.yaml", "name: web\nspec:\n  image: nginx\n");
    let legacy = ws.doc("legacies/old.yaml", "id: 4\n");
    let broken = ws.doc("legacies/broken.yaml", "id: [4\n");

    let output = ws.run(&[profile.as_str(), legacy.as_str(), broken.as_str()]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("1 of 3 file(s) failed validation"), "{out}");
    assert!(out.contains("legacies/broken.yaml"), "{out}");
    assert!(!out.contains("profiles/web.yaml"), "{out}");
}

#[test]
fn explicit_kind_flag_overrides_path() {
    let ws = Workspace::new();
    let file = ws.doc("profiles/actually-legacy.yaml", "id: 9\n");

    let output = ws.run(&["--legacies", file.as_str()]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
}

#[test]
fn unsniffable_path_warns_and_assumes_profile() {
    let ws = Workspace::new();
    let file = ws.doc("misc/web.yaml", "name: web\nspec:\n  image: nginx\n");

    let output = ws.run(&[file.as_str()]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("assuming profiles"), "{}", stderr(&output));
}

#[test]
fn loose_after_file_is_fatal() {
    let ws = Workspace::new();
    let file = ws.doc("profiles/web.yaml", "name: web\nspec:\n  image: nginx\n");

    let output = ws.run(&[file.as_str(), "--loose"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("--loose must come before any file arguments"));
}

#[test]
fn unknown_flag_is_fatal() {
    let ws = Workspace::new();
    let output = ws.run(&["--frobnicate", "profiles/web.yaml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unrecognized flag '--frobnicate'"));
}

#[test]
fn bare_double_dash_is_rejected_in_any_position() {
    let ws = Workspace::new();
    let file = ws.doc("profiles/web.yaml", "name: web\nspec:\n  image: nginx\n");

    for args in [["--", file.as_str()], [file.as_str(), "--"]] {
        let output = ws.run(&args);
        assert_eq!(output.status.code(), Some(1), "args: {args:?}");
        assert!(stdout(&output).is_empty(), "args: {args:?}");
        assert!(stderr(&output).contains("unrecognized flag '--'"), "{}", stderr(&output));
    }
}

#[test]
fn nosniff_without_kind_is_fatal() {
    let ws = Workspace::new();
    let output = ws.run(&["--nosniff", "profiles/web.yaml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("sniffing is disabled"));
}

#[test]
fn missing_schema_version_is_fatal() {
    let ws = Workspace::new();
    let file = ws.doc("profiles/web.yaml", "name: web\nspec:\n  image: nginx\n");

    let output = Command::new(env!("CARGO_BIN_EXE_profcheck"))
        .arg(&file)
        .current_dir(ws.root())
        .env("PROFCHECK_SCHEMA_ROOT", ws.root().join("schemas"))
        .env("PROFCHECK_SCHEMA_VERSION", "v9")
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot load profiles schema"), "{}", stderr(&output));
}
