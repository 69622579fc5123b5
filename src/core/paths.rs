//! Canonical install locations under the hacksports root.

use crate::core::sanitize::sanitize_name;
use crate::utils::error::Result;
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

pub const HACKSPORTS_ROOT: &str = "/opt/hacksports";
pub const HACKSPORTS_ROOT_ENV: &str = "HACKSPORTS_ROOT";

pub const SOURCES_DIR: &str = "sources";
pub const EXTRA_DIR: &str = "extra";
pub const STAGING_DIR: &str = "staging";
pub const DEPLOYED_DIR: &str = "deployed";
pub const BUNDLES_DIR: &str = "bundles";

/// The directory tree every installed problem and bundle lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HacksportsLayout {
    root: PathBuf,
}

impl Default for HacksportsLayout {
    fn default() -> Self {
        Self::new(HACKSPORTS_ROOT)
    }
}

impl HacksportsLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `HACKSPORTS_ROOT` when set to an absolute path, the default root
    /// otherwise.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(HACKSPORTS_ROOT_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(root) if Path::new(&root).is_absolute() => {
                tracing::debug!("Using hacksports root from environment: {}", root);
                Self::new(root)
            }
            Some(root) if !root.is_empty() => {
                tracing::warn!(
                    "Ignoring {}={}: not an absolute path, using {}",
                    HACKSPORTS_ROOT_ENV,
                    root,
                    HACKSPORTS_ROOT
                );
                Self::default()
            }
            _ => Self::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn problem_root(&self) -> PathBuf {
        self.root.join(SOURCES_DIR)
    }

    pub fn extra_root(&self) -> PathBuf {
        self.root.join(EXTRA_DIR)
    }

    pub fn staging_root(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    pub fn deployed_root(&self) -> PathBuf {
        self.root.join(DEPLOYED_DIR)
    }

    pub fn bundle_root(&self) -> PathBuf {
        self.root.join(BUNDLES_DIR)
    }

    /// Installation location for a problem.
    ///
    /// # Panics
    ///
    /// If the layout root is not absolute.
    pub fn problem_install_path(&self, problem_name: &str, absolute: bool) -> Result<PathBuf> {
        install_path(&self.problem_root(), problem_name, absolute)
    }

    /// Installation location for a bundle.
    ///
    /// # Panics
    ///
    /// If the layout root is not absolute.
    pub fn bundle_install_path(&self, bundle_name: &str, absolute: bool) -> Result<PathBuf> {
        install_path(&self.bundle_root(), bundle_name, absolute)
    }
}

fn install_path(base: &Path, name: &str, absolute: bool) -> Result<PathBuf> {
    let path = base.join(sanitize_name(name)?);

    assert!(
        path.is_absolute(),
        "install root must be absolute, got {}",
        path.display()
    );

    if absolute {
        return Ok(path);
    }

    match path.strip_prefix(MAIN_SEPARATOR_STR) {
        Ok(relative) => Ok(relative.to_path_buf()),
        Err(_) => Ok(path),
    }
}

pub fn get_problem_root(problem_name: &str, absolute: bool) -> Result<PathBuf> {
    HacksportsLayout::default().problem_install_path(problem_name, absolute)
}

pub fn get_bundle_root(bundle_name: &str, absolute: bool) -> Result<PathBuf> {
    HacksportsLayout::default().bundle_install_path(bundle_name, absolute)
}
