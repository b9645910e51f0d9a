//! Tool config loader (strict parsing).

pub mod schema;

use std::fs;

use crate::error::{Result, ToolError};

pub use schema::{NormalizeSection, ToolConfig};

pub fn load_from_file(path: &str) -> Result<ToolConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ToolError::Config(format!("read {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ToolConfig> {
    let cfg: ToolConfig = serde_yaml::from_str(s)
        .map_err(|e| ToolError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
