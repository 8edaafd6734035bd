mod kinds;

use std::ops::{Deref, DerefMut};

pub use crate::kinds::{
  InvalidOptionError, MissingExportError, ResolutionError, TransformError, UnsupportedFormatError,
};

#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  /// Returns the first error of kind `E`, if any.
  pub fn find<E>(&self) -> Option<&E>
  where
    E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
  {
    self.0.iter().find_map(|err| err.downcast_ref::<E>())
  }

  pub fn contains<E>(&self) -> bool
  where
    E: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
  {
    self.find::<E>().is_some()
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (idx, error) in self.0.iter().enumerate() {
      if idx > 0 {
        writeln!(f)?;
      }
      write!(f, "{error}")?;
    }
    Ok(())
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

macro_rules! impl_from_kind {
  ($($kind:ty),*) => {
    $(
      impl From<$kind> for BuildError {
        fn from(error: $kind) -> Self {
          Self(vec![error.into()])
        }
      }
    )*
  };
}

impl_from_kind!(
  InvalidOptionError,
  MissingExportError,
  ResolutionError,
  TransformError,
  UnsupportedFormatError
);

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn finds_typed_errors_in_batch() {
    let error = BuildError(vec![
      anyhow::anyhow!("plain"),
      UnsupportedFormatError { format: "amd".to_string() }.into(),
    ]);
    assert!(error.contains::<UnsupportedFormatError>());
    assert!(!error.contains::<ResolutionError>());
    assert_eq!(error.find::<UnsupportedFormatError>().map(|e| e.format.as_str()), Some("amd"));
  }

  #[test]
  fn display_joins_lines() {
    let error = BuildError(vec![anyhow::anyhow!("a"), anyhow::anyhow!("b")]);
    assert_eq!(error.to_string(), "a\nb");
  }
}
