pub mod build_descriptor;
pub mod output_exports;
pub mod output_format;
pub mod platform;

use std::path::PathBuf;

use esmpack_plugin::SharedPlugin;

use crate::{OutputExports, OutputFormat, Platform};

/// User facing build options. Every field is optional; `BuildDescriptor` is the normalized form.
#[derive(Default, Debug, Clone)]
pub struct BuildOptions {
  // --- Input
  pub input: Option<String>,
  pub cwd: Option<PathBuf>,
  pub platform: Option<Platform>,
  pub external: Option<Vec<String>>,

  // --- Output
  pub file: Option<String>,
  pub format: Option<OutputFormat>,
  pub name: Option<String>,
  pub exports: Option<OutputExports>,
  pub banner: Option<String>,
  pub footer: Option<String>,

  // --- Plugins, applied in order
  pub plugins: Vec<SharedPlugin>,
}
