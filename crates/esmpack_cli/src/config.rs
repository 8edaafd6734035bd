use std::path::{Path, PathBuf};

use anyhow::Context;
use esmpack::{OutputExports, Platform};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "esmpack.config.json";

/// Contents of `esmpack.config.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
  pub input: Option<String>,
  pub cwd: Option<PathBuf>,
  pub platform: Option<Platform>,
  pub external: Vec<String>,
  pub output: OutputConfig,
  pub plugins: Vec<PluginConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
  pub file: Option<String>,
  /// Parsed later so an unknown format surfaces as `UnsupportedFormatError`.
  pub format: Option<String>,
  pub name: Option<String>,
  pub exports: Option<OutputExports>,
  pub banner: Option<String>,
  pub footer: Option<String>,
}

/// `"commonjs"` or `{ "name": "commonjs", "options": { ... } }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PluginConfig {
  Name(String),
  WithOptions {
    name: String,
    #[serde(default)]
    options: serde_json::Value,
  },
}

impl PluginConfig {
  pub fn name(&self) -> &str {
    match self {
      Self::Name(name) | Self::WithOptions { name, .. } => name,
    }
  }

  pub fn options(&self) -> Option<&serde_json::Value> {
    match self {
      Self::Name(_) => None,
      Self::WithOptions { options, .. } => Some(options).filter(|options| !options.is_null()),
    }
  }
}

impl ConfigFile {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file {}", path.display()))?;
    Self::parse(&content).with_context(|| format!("Invalid config file {}", path.display()))
  }

  pub fn parse(content: &str) -> anyhow::Result<Self> {
    Ok(serde_json::from_str(content)?)
  }
}
