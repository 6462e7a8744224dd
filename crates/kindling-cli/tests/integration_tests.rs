//! Integration tests for kindling-cli.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const MODULE: &str = "github.com/acme/provider-cloud";

/// A command isolated from the developer's configuration and environment.
fn kindling(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("kindling");
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir)
        .env_remove("KINDLING_TEMPLATES_DIR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn init(dir: &Path) {
    kindling(dir)
        .args(["init", "--module", MODULE, "--domain", "cloud.acme.io"])
        .assert()
        .success();
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    kindling(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("kindling"))
        .stdout(predicate::str::contains("create"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    kindling(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_init_generates_skeleton() {
    let temp = TempDir::new().unwrap();
    init(temp.path());

    let root = temp.path();
    let go_mod = fs::read_to_string(root.join("go.mod")).unwrap();
    assert!(go_mod.starts_with(&format!("module {MODULE}\n")));
    assert!(root.join("apis/provider-cloud.go").is_file());
    assert!(root.join("internal/controller/provider-cloud.go").is_file());
    assert!(root.join("cluster/images/provider-cloud/Dockerfile").is_file());
    assert!(root.join("LICENSE").is_file());

    let project = fs::read_to_string(root.join("kindling.toml")).unwrap();
    assert!(project.contains(MODULE));
    assert!(project.contains("cloud.acme.io"));
}

#[test]
fn test_init_into_dir() {
    let temp = TempDir::new().unwrap();
    kindling(temp.path())
        .args(["init", "--module", MODULE, "--dir", "provider"])
        .assert()
        .success();
    assert!(temp.path().join("provider/go.mod").is_file());
    assert!(temp.path().join("provider/kindling.toml").is_file());
}

#[test]
fn test_init_twice_requires_force() {
    let temp = TempDir::new().unwrap();
    init(temp.path());

    kindling(temp.path())
        .args(["init", "--module", MODULE])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    kindling(temp.path())
        .args(["init", "--module", MODULE, "--force"])
        .assert()
        .success();
}

#[test]
fn test_create_api_generates_and_registers() {
    let temp = TempDir::new().unwrap();
    init(temp.path());

    kindling(temp.path())
        .args([
            "create", "api", "--group", "compute", "--version", "v1alpha1", "--kind", "Instance",
        ])
        .assert()
        .success();

    let root = temp.path();
    assert!(root.join("apis/compute/v1alpha1/instance_types.go").is_file());
    assert!(
        root.join("internal/controller/compute/instance/instance.go")
            .is_file()
    );

    let controllers = fs::read_to_string(root.join("internal/controller/provider-cloud.go")).unwrap();
    assert!(controllers.contains(&format!(
        "\tcomputeinstance \"{MODULE}/internal/controller/compute/instance\"\n"
    )));
    assert!(controllers.contains("\t\tcomputeinstance.Setup,\n"));

    let apis = fs::read_to_string(root.join("apis/provider-cloud.go")).unwrap();
    assert!(apis.contains("computev1alpha1.SchemeBuilder.AddToScheme"));

    let project = fs::read_to_string(root.join("kindling.toml")).unwrap();
    assert!(project.contains("[[resources]]"));
    assert!(project.contains("Instance"));
}

#[test]
fn test_create_api_twice_is_idempotent() {
    let temp = TempDir::new().unwrap();
    init(temp.path());
    let args = ["create", "api", "-g", "storage", "--version", "v1", "-k", "Bucket"];

    kindling(temp.path()).args(args).assert().success();
    let aggregator = temp.path().join("internal/controller/provider-cloud.go");
    let first = fs::read_to_string(&aggregator).unwrap();

    kindling(temp.path())
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&aggregator).unwrap(), first);
    let project = fs::read_to_string(temp.path().join("kindling.toml")).unwrap();
    assert_eq!(project.matches("[[resources]]").count(), 1);
}

#[test]
fn test_reinit_keeps_recorded_resources() {
    let temp = TempDir::new().unwrap();
    init(temp.path());
    kindling(temp.path())
        .args(["create", "api", "-g", "net", "--version", "v1", "-k", "Vpc"])
        .assert()
        .success();

    kindling(temp.path())
        .args(["init", "--module", MODULE, "--force"])
        .assert()
        .success();

    let project = fs::read_to_string(temp.path().join("kindling.toml")).unwrap();
    assert!(project.contains("Vpc"));
    let apis = fs::read_to_string(temp.path().join("apis/provider-cloud.go")).unwrap();
    assert!(apis.contains("netv1.SchemeBuilder.AddToScheme"));
}

#[test]
fn test_recorded_year_keeps_aggregator_headers_stable() {
    let temp = TempDir::new().unwrap();
    init(temp.path());

    let project_path = temp.path().join("kindling.toml");
    let project = fs::read_to_string(&project_path).unwrap();
    assert!(project.contains("year = "));
    let pinned = project
        .lines()
        .map(|line| {
            if line.starts_with("year = ") {
                "year = 2019".to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&project_path, pinned).unwrap();

    kindling(temp.path())
        .args(["create", "api", "-g", "s3", "--version", "v1", "-k", "Bucket"])
        .assert()
        .success();
    let apis = fs::read_to_string(temp.path().join("apis/provider-cloud.go")).unwrap();
    assert!(apis.contains("Copyright 2019"));

    kindling(temp.path())
        .args(["create", "api", "-g", "s3", "--version", "v1", "-k", "Bucket"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(temp.path().join("apis/provider-cloud.go")).unwrap(),
        apis
    );
}

#[test]
fn test_list_command() {
    let temp = TempDir::new().unwrap();
    kindling(temp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Templates"))
        .stdout(predicate::str::contains("ApisGroupVersionKindTypesGo"))
        .stdout(predicate::str::contains("per-resource"));
}

#[test]
fn test_list_json() {
    let temp = TempDir::new().unwrap();
    let output = kindling(temp.path())
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let templates = value.as_array().unwrap();
    assert_eq!(templates.len(), 18);
    assert!(templates
        .iter()
        .any(|t| t["identifier"] == "InternalControllerImageNameGo"));
}

#[test]
fn test_user_template_dir_replaces_bundled() {
    let temp = TempDir::new().unwrap();
    let templates = temp.path().join("tpl/project");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("README.md.tmpl"), "# {{PROJECT_NAME}}\n").unwrap();

    kindling(temp.path())
        .env("KINDLING_TEMPLATES_DIR", temp.path().join("tpl"))
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout("ReadmeMd\n");
}

#[test]
fn test_json_report() {
    let temp = TempDir::new().unwrap();
    let output = kindling(temp.path())
        .args([
            "--output-format",
            "json",
            "init",
            "--module",
            MODULE,
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["written"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p == "go.mod"));
    assert!(value["failures"].as_array().unwrap().is_empty());
}

#[test]
fn test_quiet_flag() {
    let temp = TempDir::new().unwrap();
    kindling(temp.path())
        .args(["-q", "init", "--module", MODULE])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_config_file_supplies_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("kindling-config.toml");
    fs::write(
        &config,
        "[defaults]\ndomain = \"cloud.acme.io\"\nmodule_prefix = \"github.com/acme\"\n",
    )
    .unwrap();

    kindling(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["init", "--module", "provider-cloud"])
        .assert()
        .success();

    let project = fs::read_to_string(temp.path().join("kindling.toml")).unwrap();
    assert!(project.contains("module_path = \"github.com/acme/provider-cloud\""));
    assert!(project.contains("domain = \"cloud.acme.io\""));
}

#[test]
fn test_shell_completions() {
    let temp = TempDir::new().unwrap();
    kindling(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kindling"));
}
