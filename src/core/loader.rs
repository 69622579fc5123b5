//! Loading of `problem.json` and `bundle.json` from a problem or bundle
//! directory. Any failure here is fatal for the calling command.

use crate::config::schema::{BUNDLE_SCHEMA, PROBLEM_SCHEMA};
use crate::domain::model::{BundleSpec, ProblemSpec};
use crate::utils::error::{LoadFailure, Result, ShellError};
use crate::utils::validation::{Schema, Violation};
use serde_json::{Map, Value};
use std::path::Path;

pub const PROBLEM_FILE: &str = "problem.json";
pub const BUNDLE_FILE: &str = "bundle.json";

/// Retrieves the problem spec from a problem directory.
pub fn get_problem(problem_path: &Path) -> Result<ProblemSpec> {
    let json_path = problem_path.join(PROBLEM_FILE);
    let problem = load_validated(&json_path, &PROBLEM_SCHEMA)?;
    tracing::debug!("Loaded problem object from {}", json_path.display());
    Ok(problem)
}

/// Retrieves the bundle spec from a bundle directory.
pub fn get_bundle(bundle_path: &Path) -> Result<BundleSpec> {
    let json_path = bundle_path.join(BUNDLE_FILE);
    let bundle = load_validated(&json_path, &BUNDLE_SCHEMA)?;
    tracing::debug!("Loaded bundle object from {}", json_path.display());
    Ok(bundle)
}

/// Reads `path` as JSON and checks it against `schema`.
///
/// Read, parse and schema failures are logged against the file and returned
/// as [`ShellError::Fatal`].
pub(crate) fn load_validated(path: &Path, schema: &Schema) -> Result<Map<String, Value>> {
    let fatal = |cause: LoadFailure| fatal_load(path, schema.name, cause);

    let content = std::fs::read_to_string(path).map_err(|e| fatal(LoadFailure::Read(e)))?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| fatal(LoadFailure::Parse(e)))?;

    schema
        .validate(&value)
        .map_err(|errors| fatal(LoadFailure::Schema(errors)))?;

    match value {
        Value::Object(object) => Ok(object),
        // validate() already rejects anything that is not an object
        _ => Err(fatal(LoadFailure::Schema(vec![Violation::NotAnObject].into()))),
    }
}

/// Logs a load failure against its file and wraps it as fatal.
pub(crate) fn fatal_load(path: &Path, what: &str, cause: LoadFailure) -> ShellError {
    tracing::error!("{}", failure_headline(path, what, &cause));
    tracing::error!("{}", cause);
    ShellError::fatal(path, cause)
}

fn failure_headline(path: &Path, what: &str, cause: &LoadFailure) -> String {
    let path = path.display();
    match cause {
        LoadFailure::Read(_) => format!("Could not read {what} file at '{path}'!"),
        LoadFailure::Parse(_) => format!("Could not parse {what} file at '{path}' as JSON!"),
        LoadFailure::Schema(_) => format!("Error validating {what} object at '{path}'!"),
        LoadFailure::PortRange { .. } => {
            format!("Error validating port range in config file at '{path}'!")
        }
        LoadFailure::InvertedPortRange { .. } => {
            format!("Invalid port range in config file at '{path}'!")
        }
    }
}
