use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputExports {
  #[default]
  Auto,
  Default,
  Named,
  None,
}

impl FromStr for OutputExports {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "auto" => Ok(Self::Auto),
      "default" => Ok(Self::Default),
      "named" => Ok(Self::Named),
      "none" => Ok(Self::None),
      _ => Err(format!("Invalid exports mode: {s:?}")),
    }
  }
}
