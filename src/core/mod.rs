pub mod fs_ops;
pub mod loader;
pub mod paths;
pub mod sanitize;

pub use crate::domain::model::{BundleSpec, ProblemSpec};
pub use crate::utils::error::Result;
