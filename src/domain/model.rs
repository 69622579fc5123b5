use serde_json::{Map, Value};

/// A validated `problem.json` object, exactly as it was read.
pub type ProblemSpec = Map<String, Value>;

/// A validated `bundle.json` object, exactly as it was read.
pub type BundleSpec = Map<String, Value>;
