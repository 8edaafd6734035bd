use serde::Deserialize;

use crate::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
  /// Represents the Node.js platform.
  Node,
  Browser,
  Neutral,
}

impl Platform {
  /// Bundles are Node libraries unless they are meant to run as a browser script.
  pub fn default_for(format: OutputFormat) -> Self {
    match format {
      OutputFormat::Esm | OutputFormat::Cjs => Self::Node,
      OutputFormat::Iife => Self::Browser,
    }
  }
}
