//! Declarative, one-level schema checks for JSON objects.
//!
//! A [`Schema`] is a static list of [`FieldRule`]s. Validation walks every
//! rule and reports all violations at once instead of stopping at the first.
//! Container values (lists, objects) are only checked for their container
//! type, never for the shape of their elements.

use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    List,
    Object,
}

impl FieldType {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            // serde_json never reports booleans or floats as i64/u64; integers
            // wider than u64 parse as floats and are rejected too
            FieldType::Integer => value.is_i64() || value.is_u64(),
            FieldType::Boolean => value.is_boolean(),
            FieldType::List => value.is_array(),
            FieldType::Object => value.is_object(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::List => "list",
            FieldType::Object => "object",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Inclusive bounds on the character count of a string.
    Length { min: usize, max: usize },
    /// Inclusive bounds on an integer. `max: None` is unbounded.
    Range { min: i64, max: Option<i64> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub key: &'static str,
    pub required: bool,
    pub kind: FieldType,
    pub constraint: Option<Constraint>,
}

impl FieldRule {
    pub const fn required(key: &'static str, kind: FieldType) -> Self {
        Self {
            key,
            required: true,
            kind,
            constraint: None,
        }
    }

    pub const fn optional(key: &'static str, kind: FieldType) -> Self {
        Self {
            key,
            required: false,
            kind,
            constraint: None,
        }
    }

    pub const fn length(self, min: usize, max: usize) -> Self {
        Self {
            constraint: Some(Constraint::Length { min, max }),
            ..self
        }
    }

    pub const fn range(self, min: i64, max: Option<i64>) -> Self {
        Self {
            constraint: Some(Constraint::Range { min, max }),
            ..self
        }
    }

    fn check(&self, value: &Value, violations: &mut Vec<Violation>) {
        if !self.kind.matches(value) {
            violations.push(Violation::WrongType {
                key: self.key.to_string(),
                expected: self.kind,
            });
            return;
        }

        match self.constraint {
            Some(Constraint::Length { min, max }) => {
                let actual = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
                if actual < min || actual > max {
                    violations.push(Violation::Length {
                        key: self.key.to_string(),
                        min,
                        max,
                        actual,
                    });
                }
            }
            Some(Constraint::Range { min, max }) => {
                let Some(actual) = integer_value(value) else {
                    return;
                };
                let too_low = actual < i128::from(min);
                let too_high = max.is_some_and(|max| actual > i128::from(max));
                if too_low || too_high {
                    violations.push(Violation::Range {
                        key: self.key.to_string(),
                        min,
                        max,
                        actual,
                    });
                }
            }
            None => {}
        }
    }
}

fn integer_value(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
    /// Open schemas accept keys that no rule names.
    pub allow_extra: bool,
}

impl Schema {
    pub fn field(&self, key: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.key == key)
    }

    pub fn validate(&self, value: &Value) -> Result<(), ValidationErrors> {
        match value.as_object() {
            Some(object) => self.validate_object(object),
            None => Err(ValidationErrors::from(vec![Violation::NotAnObject])),
        }
    }

    pub fn validate_object(&self, object: &Map<String, Value>) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();

        for rule in self.fields {
            match object.get(rule.key) {
                Some(value) => rule.check(value, &mut violations),
                None if rule.required => violations.push(Violation::MissingKey {
                    key: rule.key.to_string(),
                }),
                None => {}
            }
        }

        if !self.allow_extra {
            for key in object.keys() {
                if self.field(key).is_none() {
                    violations.push(Violation::ExtraKey { key: key.clone() });
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::from(violations))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    NotAnObject,
    MissingKey {
        key: String,
    },
    WrongType {
        key: String,
        expected: FieldType,
    },
    Length {
        key: String,
        min: usize,
        max: usize,
        actual: usize,
    },
    Range {
        key: String,
        min: i64,
        max: Option<i64>,
        actual: i128,
    },
    ExtraKey {
        key: String,
    },
}

impl Violation {
    pub fn key(&self) -> Option<&str> {
        match self {
            Violation::NotAnObject => None,
            Violation::MissingKey { key }
            | Violation::WrongType { key, .. }
            | Violation::Length { key, .. }
            | Violation::Range { key, .. }
            | Violation::ExtraKey { key } => Some(key),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotAnObject => write!(f, "expected an object"),
            Violation::MissingKey { key } => write!(f, "required key not provided @ data['{key}']"),
            Violation::WrongType { key, expected } => {
                write!(f, "expected {expected} @ data['{key}']")
            }
            Violation::Length {
                key,
                min,
                max,
                actual,
            } => write!(
                f,
                "length of value must be between {min} and {max}, got {actual} @ data['{key}']"
            ),
            Violation::Range {
                key,
                min,
                max: Some(max),
                actual,
            } => write!(
                f,
                "value must be between {min} and {max}, got {actual} @ data['{key}']"
            ),
            Violation::Range {
                key,
                min,
                max: None,
                actual,
            } => write!(f, "value must be at least {min}, got {actual} @ data['{key}']"),
            Violation::ExtraKey { key } => write!(f, "extra keys not allowed @ data['{key}']"),
        }
    }
}

/// Every constraint a value broke, in rule order followed by unknown keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    pub fn mentions(&self, key: &str) -> bool {
        self.violations.iter().any(|v| v.key() == Some(key))
    }
}

impl From<Vec<Violation>> for ValidationErrors {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
