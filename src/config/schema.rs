//! The fixed schemas for `problem.json`, `bundle.json`, the deploy config and
//! its banned port ranges.

use crate::utils::validation::{FieldRule, FieldType, Schema};

/// Upper bound accepted for a banned port. Kept as historically configured.
pub const MAX_PORT_BOUND: i64 = 66635;

pub static PROBLEM_SCHEMA: Schema = Schema {
    name: "problem",
    fields: &[
        FieldRule::required("author", FieldType::String).length(1, 32),
        FieldRule::required("score", FieldType::Integer).range(0, None),
        FieldRule::required("name", FieldType::String).length(1, 32),
        FieldRule::required("description", FieldType::String),
        FieldRule::required("category", FieldType::String).length(1, 32),
        FieldRule::required("hints", FieldType::List),
        FieldRule::optional("version", FieldType::String).length(1, 8),
        FieldRule::optional("tags", FieldType::List),
        FieldRule::optional("organization", FieldType::String).length(1, 32),
        FieldRule::optional("pkg_description", FieldType::String).length(1, 256),
        FieldRule::optional("pkg_name", FieldType::String).length(1, 32),
        FieldRule::optional("pkg_dependencies", FieldType::List),
        FieldRule::optional("pip_requirements", FieldType::List),
    ],
    allow_extra: false,
};

pub static BUNDLE_SCHEMA: Schema = Schema {
    name: "bundle",
    fields: &[
        FieldRule::required("author", FieldType::String).length(1, 32),
        FieldRule::required("problems", FieldType::List),
        FieldRule::required("name", FieldType::String).length(1, 32),
        FieldRule::required("description", FieldType::String),
        FieldRule::required("categories", FieldType::List),
        FieldRule::optional("version", FieldType::String).length(1, 8),
        FieldRule::optional("tags", FieldType::List),
        FieldRule::optional("organization", FieldType::String).length(1, 32),
        FieldRule::optional("dependencies", FieldType::Object),
        FieldRule::optional("pkg_dependencies", FieldType::List),
    ],
    allow_extra: false,
};

pub static CONFIG_SCHEMA: Schema = Schema {
    name: "config",
    fields: &[
        FieldRule::required("deploy_secret", FieldType::String),
        FieldRule::required("hostname", FieldType::String),
        FieldRule::required("web_server", FieldType::String),
        FieldRule::required("default_user", FieldType::String),
        FieldRule::required("web_root", FieldType::String),
        FieldRule::required("problem_directory_root", FieldType::String),
        FieldRule::required("obfuscate_problem_directories", FieldType::Boolean),
        FieldRule::required("banned_ports", FieldType::List),
    ],
    allow_extra: true,
};

pub static PORT_RANGE_SCHEMA: Schema = Schema {
    name: "port_range",
    fields: &[
        FieldRule::required("start", FieldType::Integer).range(0, Some(MAX_PORT_BOUND)),
        FieldRule::required("end", FieldType::Integer).range(0, Some(MAX_PORT_BOUND)),
    ],
    allow_extra: false,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn problem() -> serde_json::Value {
        json!({
            "author": "alice",
            "score": 50,
            "name": "Buffer Overflow 1",
            "description": "Smash the stack.",
            "category": "Binary Exploitation",
            "hints": ["Look at the return address"]
        })
    }

    #[test]
    fn test_problem_with_required_fields_passes() {
        assert!(PROBLEM_SCHEMA.validate(&problem()).is_ok());
    }

    #[test]
    fn test_problem_missing_author_fails() {
        let mut value = problem();
        value.as_object_mut().unwrap().remove("author");

        let errors = PROBLEM_SCHEMA.validate(&value).unwrap_err();
        assert!(errors.mentions("author"));
    }

    #[test]
    fn test_problem_negative_score_fails() {
        let mut value = problem();
        value["score"] = json!(-1);

        let errors = PROBLEM_SCHEMA.validate(&value).unwrap_err();
        assert!(errors.mentions("score"));
    }

    #[test]
    fn test_problem_rejects_unknown_key() {
        let mut value = problem();
        value["flag"] = json!("picoCTF{...}");

        let errors = PROBLEM_SCHEMA.validate(&value).unwrap_err();
        assert!(errors.mentions("flag"));
    }

    #[test]
    fn test_problem_optional_fields_are_bounded() {
        let mut value = problem();
        value["version"] = json!("1.0.0-beta");
        value["pkg_description"] = json!("x".repeat(257));

        let errors = PROBLEM_SCHEMA.validate(&value).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.mentions("version"));
        assert!(errors.mentions("pkg_description"));
    }

    #[test]
    fn test_bundle_dependencies_must_be_object() {
        let value = json!({
            "author": "bob",
            "problems": ["buffer-overflow-1"],
            "name": "Intro Pack",
            "description": "Starter problems",
            "categories": ["Binary Exploitation"],
            "dependencies": ["buffer-overflow-1"]
        });

        let errors = BUNDLE_SCHEMA.validate(&value).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.mentions("dependencies"));
    }

    #[test]
    fn test_config_schema_is_open() {
        let value = json!({
            "deploy_secret": "s3cret",
            "hostname": "shell.example.com",
            "web_server": "http://web.example.com",
            "default_user": "hacksports",
            "web_root": "/usr/share/nginx/html/",
            "problem_directory_root": "/problems/",
            "obfuscate_problem_directories": false,
            "banned_ports": [],
            "competition_name": "practice"
        });

        assert!(CONFIG_SCHEMA.validate(&value).is_ok());
    }

    #[test]
    fn test_port_range_bounds() {
        assert!(PORT_RANGE_SCHEMA
            .validate(&json!({"start": 0, "end": MAX_PORT_BOUND}))
            .is_ok());
        assert!(PORT_RANGE_SCHEMA
            .validate(&json!({"start": 0, "end": MAX_PORT_BOUND + 1}))
            .is_err());
        assert!(PORT_RANGE_SCHEMA
            .validate(&json!({"start": 1, "end": 2, "proto": "tcp"}))
            .is_err());
    }
}
