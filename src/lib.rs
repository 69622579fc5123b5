pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{get_config, DeployConfig, PortRange};
pub use crate::core::fs_ops::{full_copy, move_path};
pub use crate::core::loader::{get_bundle, get_problem};
pub use crate::core::paths::{get_bundle_root, get_problem_root, HacksportsLayout};
pub use crate::core::sanitize::sanitize_name;
pub use crate::domain::model::{BundleSpec, ProblemSpec};
pub use crate::utils::error::{FatalLoadError, LoadFailure, Result, ShellError};
