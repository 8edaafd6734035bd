use clap::ValueEnum;

#[derive(Debug, PartialEq, Eq, Clone, Copy, ValueEnum)]
pub enum OutputExports {
  Auto,
  Default,
  Named,
  None,
}

impl From<OutputExports> for esmpack::OutputExports {
  fn from(value: OutputExports) -> Self {
    match value {
      OutputExports::Auto => esmpack::OutputExports::Auto,
      OutputExports::Default => esmpack::OutputExports::Default,
      OutputExports::Named => esmpack::OutputExports::Named,
      OutputExports::None => esmpack::OutputExports::None,
    }
  }
}
