use gelf_core::DecodeOptions;
use serde::Deserialize;

use crate::error::{Result, ToolError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    pub version: u32,

    #[serde(default)]
    pub decode: DecodeOptions,

    #[serde(default)]
    pub normalize: NormalizeSection,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            version: 1,
            decode: DecodeOptions::default(),
            normalize: NormalizeSection::default(),
        }
    }
}

impl ToolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ToolError::UnsupportedVersion(self.version));
        }

        self.normalize.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizeSection {
    /// Stamped on records that arrive without `host`.
    #[serde(default)]
    pub default_host: Option<String>,

    /// Stamped on records that arrive without `facility`.
    #[serde(default)]
    pub default_facility: Option<String>,

    #[serde(default = "default_max_record_bytes")]
    pub max_record_bytes: usize,
}

impl Default for NormalizeSection {
    fn default() -> Self {
        Self {
            default_host: None,
            default_facility: None,
            max_record_bytes: default_max_record_bytes(),
        }
    }
}

impl NormalizeSection {
    pub fn validate(&self) -> Result<()> {
        if !(64..=8 * 1024 * 1024).contains(&self.max_record_bytes) {
            return Err(ToolError::Config(
                "normalize.max_record_bytes must be between 64 and 8388608".into(),
            ));
        }
        if matches!(self.default_host.as_deref(), Some("")) {
            return Err(ToolError::Config(
                "normalize.default_host must not be empty".into(),
            ));
        }
        if matches!(self.default_facility.as_deref(), Some("")) {
            return Err(ToolError::Config(
                "normalize.default_facility must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_record_bytes() -> usize {
    64 * 1024
}
