use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const READER_OUTPUT: &str = "dwh-workflows-loader-prodbuckets-production/dwhBucketReaderRole=arn:aws:iam::123456789012:role/dwh-bucket-reader";

/// Workspace with a config file pointing at a populated outputs directory.
fn workspace(extra_access: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let outputs = dir.path().join("outputs");
    std::fs::create_dir(&outputs).expect("failed to create outputs dir");
    for file in ["a_resources_x.csv", "a_schemas_x.csv", "b_other.csv"] {
        std::fs::write(outputs.join(file), "{}").expect("failed to write output file");
    }

    let config = format!(
        "[bucket]\nname = \"schema-bucket\"\n\n[access]\n{extra_access}\n\n[uploads]\nsource_dir = {:?}\n",
        outputs.display().to_string()
    );
    std::fs::write(dir.path().join("provisioner.toml"), config).expect("failed to write config");
    dir
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dwh-bucket-provisioner"))
        .args(["--config", dir.join("provisioner.toml").to_str().expect("utf-8 path")])
        .args(["--stack-output", READER_OUTPUT])
        .args(args)
        .env("AWS_REGION", "us-east-1")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env_remove("DWH_PROVISIONER_CONFIG")
        .output()
        .expect("failed to run dwh-bucket-provisioner")
}

#[test]
fn help_lists_commands() {
    let out = Command::new(env!("CARGO_BIN_EXE_dwh-bucket-provisioner"))
        .arg("--help")
        .output()
        .expect("failed to run --help");
    let s = String::from_utf8_lossy(&out.stdout);
    for command in ["policy", "plan", "apply"] {
        assert!(s.contains(command), "help should list {}: {}", command, s);
    }
}

#[test]
fn test_policy_prints_bucket_policy_json() {
    let dir = workspace("allow_load_balancer_logs = true");
    let output = run(dir.path(), &["policy"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr was: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let policy: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(policy["Version"], "2012-10-17");
    let statements = policy["Statement"].as_array().expect("statement list");
    assert_eq!(statements.len(), 3);
    assert_eq!(
        statements[0]["Principal"]["AWS"],
        "arn:aws:iam::123456789012:role/dwh-bucket-reader"
    );
    assert_eq!(statements[0]["Resource"][0], "arn:aws:s3:::schema-bucket/*");
    assert_eq!(statements[1]["Resource"][0], "arn:aws:s3:::schema-bucket");
    assert_eq!(statements[2]["Principal"]["AWS"], "arn:aws:iam::797873946194:root");
    assert_eq!(
        statements[2]["Resource"][0],
        "arn:aws:s3:::schema-bucket/alb/AWSLogs/*"
    );
}

#[test]
fn test_plan_json_uses_date_partitioned_keys() {
    let dir = workspace("");
    let output = run(dir.path(), &["plan", "--date", "2024-03-07", "--json"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr was: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let plan: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let keys: Vec<&str> = plan["uploads"]
        .as_array()
        .expect("upload list")
        .iter()
        .map(|u| u["key"].as_str().expect("key"))
        .collect();
    assert_eq!(
        keys,
        vec![
            "Resources/2024/3/7/a_resources_x.csv",
            "Schemas/2024/3/7/a_schemas_x.csv",
        ]
    );
    assert_eq!(plan["ownership"]["object_ownership"], "BucketOwnerEnforced");
    assert!(plan.get("notification").is_none());
}

#[test]
fn test_plan_human_output_on_stderr() {
    let dir = workspace("notification_target = \"arn:aws:sqs:us-west-2:123456789012:snowpipe\"");
    let output = run(dir.path(), &["plan", "--date", "2024-03-07"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Bucket: schema-bucket"), "stderr was: {}", stderr);
    assert!(stderr.contains("s3:ObjectCreated:*"), "stderr was: {}", stderr);
    assert!(
        stderr.contains("Schemas/2024/3/7/a_schemas_x.csv"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_plan_missing_stack_output_fails() {
    let dir = workspace("principals = [{ stack = \"other-stack\", output = \"role\" }]");
    let output = run(dir.path(), &["plan"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("other-stack"), "stderr was: {}", stderr);
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(dir.path().join("provisioner.toml"), "[bucket]\nnmae = \"typo\"\n")
        .expect("failed to write config");
    let output = run(dir.path(), &["policy"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration error"), "stderr was: {}", stderr);
}

#[test]
fn test_apply_refuses_without_tty() {
    let dir = workspace("");
    let output = run(dir.path(), &["apply", "--date", "2024-03-07"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("run interactively in a TTY or pass --yes"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_apply_dry_run_makes_no_changes() {
    let dir = workspace("");
    let output = run(dir.path(), &["apply", "--date", "2024-03-07", "--dry-run"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr was: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(result["dry_run"], true);
    assert_eq!(result["bucket"], "schema-bucket");
    assert_eq!(result["policy_statement_count"], 2);
    assert!(result["uploaded_keys"].as_array().expect("keys").is_empty());
}

#[test]
fn test_invalid_date_is_usage_error() {
    let dir = workspace("");
    let output = run(dir.path(), &["plan", "--date", "07/03/2024"]);
    assert_eq!(output.status.code(), Some(2));
}
