// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compiler settings stored as RON.

use ordoplay_shader_graph::ValidationPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings file looked up next to the input graph
pub const CONFIG_FILE_NAME: &str = "shaderc.ron";

/// Log filter used when neither `RUST_LOG` nor the settings file set one
pub const DEFAULT_LOG_FILTER: &str = "warn,ordoplay_shaderc=info";

/// Error loading or saving settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("Failed to access config file {path:?}: {source}")]
    Io {
        /// Settings file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid settings RON
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        /// Settings file path
        path: PathBuf,
        /// Underlying error
        source: ron::error::SpannedError,
    },

    /// Settings could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Compiler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadercConfig {
    /// Directory for `<stem>.wgsl` files when no `-o` is given
    pub output_dir: Option<PathBuf>,
    /// `tracing` filter directives
    pub log_filter: String,
    /// Reject duplicate output nodes and duplicate input edges
    pub strict_validation: bool,
    /// Debounce window for watch mode
    pub watch_debounce_ms: u64,
    /// Print the compile result as JSON instead of raw WGSL
    pub emit_json_result: bool,
}

impl Default for ShadercConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            strict_validation: false,
            watch_debounce_ms: 250,
            emit_json_result: false,
        }
    }
}

impl ShadercConfig {
    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Explicit settings file if given, else `shaderc.ron` beside the input,
    /// else defaults
    pub fn discover(input: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let sibling = Self::sibling_path(input);
        if sibling.is_file() {
            Self::load(&sibling)
        } else {
            Ok(Self::default())
        }
    }

    /// Settings file path next to an input graph
    pub fn sibling_path(input: &Path) -> PathBuf {
        input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(CONFIG_FILE_NAME)
    }

    /// Validation policy for loading graph documents
    pub fn validation_policy(&self) -> ValidationPolicy {
        if self.strict_validation {
            ValidationPolicy::strict()
        } else {
            ValidationPolicy::permissive()
        }
    }

    /// Watch mode debounce window
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.watch_debounce_ms)
    }

    /// `<output_dir>/<stem>.wgsl`, when an output directory is configured
    pub fn output_path(&self, input: &Path) -> Option<PathBuf> {
        let dir = self.output_dir.as_ref()?;
        let stem = input.file_stem()?;
        Some(dir.join(format!("{}.wgsl", stem.to_string_lossy())))
    }
}
