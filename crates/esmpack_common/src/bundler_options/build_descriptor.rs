use std::{path::PathBuf, sync::Arc};

use esmpack_plugin::SharedPlugin;
use sugar_path::SugarPath;

use crate::{OutputExports, OutputFormat, Platform};

/// The normalized, read-only description of a single build.
///
/// It is created once from `BuildOptions` and shared behind an `Arc` for the whole build. It only
/// describes intent; resolving, transforming and emitting is done by the bundler.
#[derive(Debug, Clone)]
pub struct BuildDescriptor {
  // --- Input
  pub input: String,
  pub cwd: PathBuf,
  pub platform: Platform,
  pub external: Vec<String>,

  // --- Output
  pub file: String,
  pub format: OutputFormat,
  pub name: Option<String>,
  pub exports: OutputExports,
  pub banner: Option<String>,
  pub footer: Option<String>,

  // --- Plugins, applied in order
  pub plugins: Vec<SharedPlugin>,
}

impl BuildDescriptor {
  /// Absolute location of the output file.
  pub fn output_path(&self) -> PathBuf {
    self.file.as_path().absolutize_with(self.cwd.as_path())
  }

  /// File name of the emitted asset, e.g. `knex-es.js` for `dist/knex-es.js`.
  pub fn output_filename(&self) -> String {
    self
      .file
      .as_path()
      .file_name()
      .map_or_else(|| self.file.clone(), |name| name.to_string_lossy().into_owned())
  }

  pub fn is_external(&self, specifier: &str) -> bool {
    self.external.iter().any(|external| {
      specifier == external
        || specifier.strip_prefix(external.as_str()).is_some_and(|rest| rest.starts_with('/'))
    })
  }
}

impl PartialEq for BuildDescriptor {
  fn eq(&self, other: &Self) -> bool {
    self.input == other.input
      && self.cwd == other.cwd
      && self.platform == other.platform
      && self.external == other.external
      && self.file == other.file
      && self.format == other.format
      && self.name == other.name
      && self.exports == other.exports
      && self.banner == other.banner
      && self.footer == other.footer
      && self.plugins.len() == other.plugins.len()
      && self.plugins.iter().zip(&other.plugins).all(|(a, b)| Arc::ptr_eq(a, b))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn descriptor() -> BuildDescriptor {
    BuildDescriptor {
      input: "./knex.js".to_string(),
      cwd: PathBuf::from("/project"),
      platform: Platform::Node,
      external: vec!["pg".to_string()],
      file: "dist/knex-es.js".to_string(),
      format: OutputFormat::Esm,
      name: None,
      exports: OutputExports::Auto,
      banner: None,
      footer: None,
      plugins: vec![],
    }
  }

  #[test]
  fn output_locations() {
    let descriptor = descriptor();
    assert_eq!(descriptor.output_filename(), "knex-es.js");
    assert_eq!(descriptor.output_path(), PathBuf::from("/project/dist/knex-es.js"));
  }

  #[test]
  fn external_matching() {
    let descriptor = descriptor();
    assert!(descriptor.is_external("pg"));
    assert!(descriptor.is_external("pg/lib/native"));
    assert!(!descriptor.is_external("pg-native"));
    assert!(!descriptor.is_external("./pg"));
  }

  #[test]
  fn clone_reads_back_identical() {
    let descriptor = descriptor();
    assert_eq!(descriptor.clone(), descriptor);
  }
}
