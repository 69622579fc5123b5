use anyhow::Result;
use serde_json::{json, Value};
use shell_manager::{get_bundle, get_config, get_problem, LoadFailure, ShellError};
use std::path::Path;
use tempfile::TempDir;

fn write_json(path: &Path, value: &Value) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn sample_problem() -> Value {
    json!({
        "author": "picoCTF",
        "score": 150,
        "name": "ROP Chain",
        "description": "Return oriented programming 101.",
        "category": "Binary Exploitation",
        "hints": ["Find the gadgets"],
        "version": "1.0",
        "tags": ["rop", "pwn"],
        "organization": "ctf-team",
        "pkg_description": "ROP chain challenge",
        "pkg_name": "rop-chain",
        "pkg_dependencies": ["gcc-multilib"],
        "pip_requirements": ["pwntools"]
    })
}

fn sample_config() -> Value {
    json!({
        "deploy_secret": "s3cret",
        "hostname": "shell.example.com",
        "web_server": "http://web.example.com",
        "default_user": "hacksports",
        "web_root": "/usr/share/nginx/html/",
        "problem_directory_root": "/problems/",
        "obfuscate_problem_directories": false,
        "banned_ports": [{"start": 50, "end": 100}]
    })
}

#[test]
fn test_full_problem_loads_unchanged() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_json(&temp_dir.path().join("problem.json"), &sample_problem())?;

    let problem = get_problem(temp_dir.path())?;
    assert_eq!(Value::Object(problem), sample_problem());
    Ok(())
}

#[test]
fn test_problem_with_unknown_key_is_fatal() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut problem = sample_problem();
    problem["walkthrough"] = json!("spoilers");
    write_json(&temp_dir.path().join("problem.json"), &problem)?;

    let err = get_problem(temp_dir.path()).unwrap_err();
    match err {
        ShellError::Fatal(fatal) => match fatal.cause {
            LoadFailure::Schema(violations) => assert!(violations.mentions("walkthrough")),
            other => panic!("unexpected cause {other:?}"),
        },
        other => panic!("expected fatal error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_problem_score_must_be_non_negative() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut problem = sample_problem();
    problem["score"] = json!(-1);
    write_json(&temp_dir.path().join("problem.json"), &problem)?;

    let err = get_problem(temp_dir.path()).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("problem.json"));
    Ok(())
}

#[test]
fn test_bundle_loads() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_json(
        &temp_dir.path().join("bundle.json"),
        &json!({
            "author": "picoCTF",
            "problems": ["rop-chain", "format-string"],
            "name": "Pwn Pack",
            "description": "Exploitation problems",
            "categories": ["Binary Exploitation"],
            "dependencies": {"format-string": {"threshold": 1, "weightmap": {"rop-chain": 1}}}
        }),
    )?;

    let bundle = get_bundle(temp_dir.path())?;
    assert_eq!(bundle["problems"].as_array().map(Vec::len), Some(2));
    assert!(bundle["dependencies"].is_object());
    Ok(())
}

#[test]
fn test_bundle_missing_required_keys_reports_all() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_json(
        &temp_dir.path().join("bundle.json"),
        &json!({"author": "picoCTF", "name": "Empty"}),
    )?;

    let err = get_bundle(temp_dir.path()).unwrap_err();
    match err {
        ShellError::Fatal(fatal) => match fatal.cause {
            LoadFailure::Schema(violations) => {
                assert_eq!(violations.len(), 3);
                assert!(violations.mentions("problems"));
                assert!(violations.mentions("description"));
                assert!(violations.mentions("categories"));
            }
            other => panic!("unexpected cause {other:?}"),
        },
        other => panic!("expected fatal error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_config_accepts_valid_port_range_and_extra_keys() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("shell.json");
    let mut config = sample_config();
    config["competition_name"] = json!("practice");
    write_json(&config_path, &config)?;

    let config = get_config(&config_path)?;
    assert!(config.is_port_banned(75));
    assert!(!config.is_port_banned(101));
    assert_eq!(config.extra["competition_name"], "practice");
    Ok(())
}

#[test]
fn test_config_rejects_inverted_port_range() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("shell.json");
    let mut config = sample_config();
    config["banned_ports"] = json!([{"start": 100, "end": 50}]);
    write_json(&config_path, &config)?;

    let err = get_config(&config_path).unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("(100 -> 50)"));
    Ok(())
}

#[test]
fn test_config_rejects_wrongly_typed_flag() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("shell.json");
    let mut config = sample_config();
    config["obfuscate_problem_directories"] = json!("yes");
    write_json(&config_path, &config)?;

    assert!(get_config(&config_path).unwrap_err().is_fatal());
    Ok(())
}
