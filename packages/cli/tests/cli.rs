//! Tests for the `afford` binary: exit codes, input sources and the
//! environment/flag configuration precedence.
//!
//! | Test | Behaviour |
//! |------|-----------|
//! | `validate_valid_catalog_from_file` | exit 0, summary on stdout |
//! | `validate_invalid_catalog_exits_one` | exit 1, one `error:` line per problem |
//! | `validate_reports_conflicts_under_active_policy` | flattening errors, `--conflict-policy` |
//! | `malformed_json_is_fatal` | exit 2, `afford:` prefix |
//! | `inspect_reads_stdin` | `-` reads stdin, meta-property excluded |
//! | `conflict_policy_flag_overrides_env` | flag > env > default |
//! | `unusable_env_policy_falls_back_to_reject` | warning, no argument error |
//! | `meta_property_flag_overrides_env` | flag > env |

use std::io::Write;
use std::process::{Command, Output, Stdio};

const VALID: &str = r#"{
    "types": [
        { "name": "Person", "properties": [
            { "name": "class", "type": "string" },
            { "name": "name", "type": "string" },
            { "name": "age", "type": "integer" } ] }
    ],
    "operations": [
        { "name": "createPerson", "verb": "POST",
          "parameters": [ { "name": "person", "type": "Person", "role": "body" } ] }
    ]
}"#;

const INVALID: &str = r#"{
    "types": [ { "name": "Employee", "extends": ["Staff"] } ],
    "operations": [
        { "name": "hire", "verb": "POST",
          "parameters": [ { "name": "e", "type": "Order", "role": "body" } ] }
    ]
}"#;

const CONFLICTING: &str = r#"{
    "types": [
        { "name": "Named", "properties": [ { "name": "id", "type": "string" } ] },
        { "name": "Numbered", "properties": [ { "name": "id", "type": "integer" } ] },
        { "name": "Record", "extends": ["Named", "Numbered"] }
    ],
    "operations": [
        { "name": "saveRecord", "verb": "PUT",
          "parameters": [ { "name": "record", "type": "Record", "role": "body" } ] }
    ]
}"#;

/// Run `afford` with a clean configuration environment, feeding `stdin`.
fn afford(args: &[&str], env: &[(&str, &str)], stdin: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_afford"));
    cmd.args(args)
        .env_remove("AFFORDANCE_META_PROPERTY")
        .env_remove("AFFORDANCE_CONFLICT_POLICY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in env {
        cmd.env(key, value);
    }

    let mut child = cmd.spawn().expect("failed to start afford");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for afford")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// The `properties` of the first affordance printed by `inspect`.
fn inspected_properties(output: &Output) -> serde_json::Value {
    let report: serde_json::Value =
        serde_json::from_str(&stdout(output)).expect("inspect prints JSON");
    report["affordances"][0]["properties"].clone()
}

#[test]
fn validate_valid_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, VALID).unwrap();

    let output = afford(&["validate", path.to_str().unwrap()], &[], "");
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "valid (1 types, 1 operations)");
}

#[test]
fn validate_invalid_catalog_exits_one() {
    let output = afford(&["validate", "-"], &[], INVALID);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("\"Staff\""), "{err}");
    assert!(err.contains("\"Order\""), "{err}");
    assert_eq!(err.lines().filter(|l| l.starts_with("error: ")).count(), 2);
}

#[test]
fn validate_reports_conflicts_under_active_policy() {
    let rejected = afford(&["validate", "-"], &[], CONFLICTING);
    assert_eq!(rejected.status.code(), Some(1));
    assert!(stderr(&rejected).contains("\"Record\""));

    let kept = afford(&["--conflict-policy", "keep-last", "validate", "-"], &[], CONFLICTING);
    assert_eq!(kept.status.code(), Some(0), "{}", stderr(&kept));
}

#[test]
fn malformed_json_is_fatal() {
    for command in ["validate", "inspect", "render"] {
        let output = afford(&[command, "-"], &[], "{ \"types\": [");
        assert_eq!(output.status.code(), Some(2), "{command}");
        assert!(stderr(&output).starts_with("afford: "), "{command}");
    }

    let missing = afford(&["inspect", "/nonexistent/catalog.json"], &[], "");
    assert_eq!(missing.status.code(), Some(2));
}

#[test]
fn inspect_reads_stdin() {
    let output = afford(&["inspect", "-"], &[], VALID);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert_eq!(
        inspected_properties(&output),
        serde_json::json!({ "age": "integer", "name": "string" })
    );
}

#[test]
fn conflict_policy_flag_overrides_env() {
    let from_env = afford(
        &["inspect", "-"],
        &[("AFFORDANCE_CONFLICT_POLICY", "keep-first")],
        CONFLICTING,
    );
    assert_eq!(from_env.status.code(), Some(0), "{}", stderr(&from_env));
    assert_eq!(inspected_properties(&from_env)["id"], "string");

    let from_flag = afford(
        &["inspect", "-", "--conflict-policy", "keep-last"],
        &[("AFFORDANCE_CONFLICT_POLICY", "keep-first")],
        CONFLICTING,
    );
    assert_eq!(from_flag.status.code(), Some(0), "{}", stderr(&from_flag));
    assert_eq!(inspected_properties(&from_flag)["id"], "integer");
}

#[test]
fn unusable_env_policy_falls_back_to_reject() {
    let env = [("AFFORDANCE_CONFLICT_POLICY", "bogus")];

    let valid = afford(&["render", "-"], &env, VALID);
    assert_eq!(valid.status.code(), Some(0), "{}", stderr(&valid));
    assert!(stdout(&valid).starts_with("POST createPerson  (input required)"));
    assert!(stderr(&valid).contains("using default"));

    let conflicting = afford(&["inspect", "-"], &env, CONFLICTING);
    assert_eq!(conflicting.status.code(), Some(2));
    let err = stderr(&conflicting);
    assert!(err.contains("declared as both"), "{err}");
    assert!(!err.contains("invalid value"), "{err}");
}

#[test]
fn meta_property_flag_overrides_env() {
    let env = [("AFFORDANCE_META_PROPERTY", "age")];

    let from_env = afford(&["inspect", "-"], &env, VALID);
    assert_eq!(
        inspected_properties(&from_env),
        serde_json::json!({ "class": "string", "name": "string" })
    );

    let from_flag = afford(&["--meta-property", "name", "inspect", "-"], &env, VALID);
    assert_eq!(
        inspected_properties(&from_flag),
        serde_json::json!({ "age": "integer", "class": "string" })
    );
}
