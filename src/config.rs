//! TOML configuration for the orientation policy.
//!
//! ```
//! use interface_orientation::{OrientationMask, config::OrientationConfig};
//!
//! let config = OrientationConfig::from_toml_str(r#"
//!     supported_interface_orientations = ["portrait", "landscapeLeft"]
//!     allow_override = false
//! "#).unwrap();
//!
//! let policy = config.policy();
//! assert_eq!(policy.default_mask(), OrientationMask::PORTRAIT | OrientationMask::LANDSCAPE_LEFT);
//! assert!(!policy.allow_override());
//! ```
//!
//! [`load_policy`] never fails: an unreadable file yields the default policy
//! (all orientations, overriding allowed) with a logged warning.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::manifest;
use crate::resolve::Policy;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Orientation section of the application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrientationConfig {
    /// Manifest-style orientation names.
    #[serde(default, alias = "UISupportedInterfaceOrientations")]
    pub supported_interface_orientations: Vec<String>,

    /// Whether views may allow orientations outside the default.
    #[serde(default = "default_allow_override")]
    pub allow_override: bool,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            supported_interface_orientations: Vec::new(),
            allow_override: default_allow_override(),
        }
    }
}

fn default_allow_override() -> bool {
    true
}

impl OrientationConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Manifest result for the configured orientation names.
    pub fn manifest(&self) -> manifest::ManifestResult {
        manifest::parse(&self.supported_interface_orientations)
    }

    /// Policy for this configuration. Bad entries are logged and skipped.
    pub fn policy(&self) -> Policy {
        Policy::new(self.manifest().mask, self.allow_override)
    }
}

/// Read the policy from a TOML file, degrading to the default policy when
/// the file cannot be read or parsed.
pub fn load_policy(path: impl AsRef<Path>) -> Policy {
    let path = path.as_ref();
    match OrientationConfig::load(path) {
        Ok(config) => config.policy(),
        Err(e) => {
            let result = manifest::unreadable(format!("{}: {e}", path.display()));
            Policy::new(result.mask, default_allow_override())
        }
    }
}
