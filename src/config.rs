use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// What to do with a zero-byte input.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInputPolicy {
    /// Fail with [`CodecError::EmptyInput`] before any output is created.
    #[default]
    Reject,
    /// Write a header with no symbols and no payload. Decoding it yields an empty file.
    EmitEmpty,
}

/// Serializable codec configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Suffix appended to encoded files and stripped when decoding.
    pub extension: String,

    /// Policy for zero-byte inputs.
    pub empty_input: EmptyInputPolicy,

    /// Remove a partially written output file when encoding or decoding fails.
    pub cleanup_partial_output: bool,

    /// Capacity of the buffered readers and writers.
    pub buffer_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            extension: ".huff".to_string(),
            empty_input: EmptyInputPolicy::Reject,
            cleanup_partial_output: true,
            buffer_capacity: 64 * 1024,
        }
    }
}

impl CodecConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CodecError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| CodecError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodecError::Config(e.to_string()))
    }

    /// Save the configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| CodecError::output(path, source))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            return Err(CodecError::Config(format!(
                "extension must start with '.' and name a suffix, got {:?}",
                self.extension
            )));
        }
        if self.extension.contains(['/', '\\']) {
            return Err(CodecError::Config(format!(
                "extension must not contain path separators, got {:?}",
                self.extension
            )));
        }
        if self.buffer_capacity == 0 {
            return Err(CodecError::Config("buffer_capacity must be greater than zero".to_string()));
        }
        Ok(())
    }
}
