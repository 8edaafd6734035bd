use std::{fmt::Display, str::FromStr};

use esmpack_error::UnsupportedFormatError;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
  Esm,
  Cjs,
  Iife,
}

impl OutputFormat {
  #[inline]
  pub fn supports_external_imports(&self) -> bool {
    !matches!(self, Self::Iife)
  }
}

impl FromStr for OutputFormat {
  type Err = UnsupportedFormatError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "es" | "esm" | "module" => Ok(Self::Esm),
      "cjs" | "commonjs" => Ok(Self::Cjs),
      "iife" => Ok(Self::Iife),
      _ => Err(UnsupportedFormatError { format: s.to_string() }),
    }
  }
}

impl TryFrom<String> for OutputFormat {
  type Error = UnsupportedFormatError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl Display for OutputFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Esm => write!(f, "es"),
      Self::Cjs => write!(f, "cjs"),
      Self::Iife => write!(f, "iife"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_known_aliases() {
    for tag in ["es", "esm", "module"] {
      assert_eq!(tag.parse::<OutputFormat>().unwrap(), OutputFormat::Esm);
    }
    assert_eq!("commonjs".parse::<OutputFormat>().unwrap(), OutputFormat::Cjs);
    assert_eq!("iife".parse::<OutputFormat>().unwrap(), OutputFormat::Iife);
    assert_eq!(OutputFormat::Esm.to_string(), "es");
  }

  #[test]
  fn rejects_unknown_format() {
    let err = "unknown-format".parse::<OutputFormat>().unwrap_err();
    assert_eq!(err.format, "unknown-format");
  }

  #[test]
  fn deserializes_through_from_str() {
    let format: OutputFormat = serde_json::from_str("\"es\"").unwrap();
    assert_eq!(format, OutputFormat::Esm);
    let err = serde_json::from_str::<OutputFormat>("\"amd\"").unwrap_err();
    assert!(err.to_string().contains("Unsupported output format \"amd\""));
  }
}
