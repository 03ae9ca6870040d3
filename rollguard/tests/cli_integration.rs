//! CLI Integration Tests
//!
//! Runs the rollguard binary against rollguard.toml files in temp directories.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run rollguard CLI commands
fn run_rollguard(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rollguard"))
        .args(args)
        .current_dir(cwd)
        .env_remove("ROLLGUARD_CONFIG")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to run rollguard command")
}

fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join("rollguard.toml"), content).unwrap();
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    let output = run_rollguard(&["--version"], temp.path());
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_check_without_config_suggests_init() {
    let temp = TempDir::new().unwrap();
    let output = run_rollguard(&["check"], temp.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("rollguard init"));
}

#[test]
fn test_init_then_check_passes() {
    let temp = TempDir::new().unwrap();

    let output = run_rollguard(&["init", "--name", "api"], temp.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let content = fs::read_to_string(temp.path().join("rollguard.toml")).unwrap();
    assert!(content.contains("name = \"api\""));

    let output = run_rollguard(&["check"], temp.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Environment production"));
    assert!(out.contains("96s"));
    assert!(out.contains("62s"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "[service]\nname = \"keep\"\n");

    let output = run_rollguard(&["init"], temp.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));

    let content = fs::read_to_string(temp.path().join("rollguard.toml")).unwrap();
    assert!(content.contains("keep"));
}

#[test]
fn test_check_reports_every_violation_and_fails() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"
[health]
timeout = 8
check_interval_lb = 6
num_checks_lb = 2
"#,
    );

    let output = run_rollguard(&["check"], temp.path());
    assert!(!output.status.success());

    let out = stdout(&output);
    assert!(out.contains("[lb] load balancer health check timeout (8s) is not shorter than its repeat interval (6s)"));
    assert!(out.contains("[race] load balancer could mark a task unhealthy"));
    assert!(out.contains("[service] service grace period"));
    assert!(stderr(&output).contains("unsafe in: production"));
}

#[test]
fn test_check_single_env() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"
[envs.production]

[envs.staging]
num_checks_lb = 1
"#,
    );

    let output = run_rollguard(&["check", "--env", "production"], temp.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!stdout(&output).contains("staging"));

    let output = run_rollguard(&["check"], temp.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unsafe in: staging"));
}

#[test]
fn test_check_unknown_env() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "[envs.production]\n");

    let output = run_rollguard(&["check", "--env", "qa"], temp.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Environment 'qa' not found"));
}

#[test]
fn test_render_outputs_plan_json() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"
[health]
endpoint_path = "/healthz"
container_port = 8080
lb_protocol = "https"
lb_port = 8443
"#,
    );

    let output = run_rollguard(&["render"], temp.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["lb"]["interval_secs"], 30);
    assert_eq!(plan["lb"]["timeout_secs"], 5);
    assert_eq!(plan["lb"]["path"], "/healthz");
    assert_eq!(plan["lb"]["port"], 8443);
    assert_eq!(plan["lb"]["protocol"], "https");
    assert_eq!(plan["lb"]["unhealthy_threshold"], 5);
    assert!(plan["lb"].get("healthy_threshold").is_none());

    assert_eq!(
        plan["orchestrator"]["command"][0],
        "wget -T 5 -O - \"http://localhost:8080/healthz\" || exit 1"
    );
    assert_eq!(plan["orchestrator"]["interval_secs"], 10);
    assert_eq!(plan["orchestrator"]["retries"], 2);
    assert_eq!(plan["orchestrator"]["start_period_secs"], 30);
    assert_eq!(plan["orchestrator"]["timeout_secs"], 6);

    assert_eq!(plan["service"]["health_check_grace_period_secs"], 10);
}

#[test]
fn test_render_compact_is_single_line() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "");

    let output = run_rollguard(&["render", "--compact"], temp.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim().lines().count(), 1);
}

#[test]
fn test_render_requires_env_with_multiple_envs() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"
[envs.production]
[envs.staging]
probe_command = "/usr/local/bin/healthcheck"
"#,
    );

    let output = run_rollguard(&["render"], temp.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--env"));

    let output = run_rollguard(&["render", "--env", "staging"], temp.path());
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        plan["orchestrator"]["command"][0],
        "/usr/local/bin/healthcheck || exit 1"
    );
}

#[test]
fn test_render_fails_without_partial_output() {
    let temp = TempDir::new().unwrap();
    write_config(
        temp.path(),
        r#"
[health]
timeout = 31
"#,
    );

    let output = run_rollguard(&["render"], temp.path());
    assert!(!output.status.success());
    assert!(stdout(&output).trim().is_empty());

    let err = stderr(&output);
    assert!(err.contains("Invalid health check timing for environment 'production'"));
    assert!(err.contains("load balancer health check timeout (31s)"));
    assert!(err.contains("orchestrator health check timeout (31s)"));
}

#[test]
fn test_config_flag_points_at_other_file() {
    let temp = TempDir::new().unwrap();
    let deploy = temp.path().join("deploy");
    fs::create_dir(&deploy).unwrap();
    fs::write(deploy.join("health.toml"), "[health]\ncontainer_port = 9000\n").unwrap();

    let output = run_rollguard(
        &["render", "--config", "deploy/health.toml", "--compact"],
        temp.path(),
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("localhost:9000"));
}
