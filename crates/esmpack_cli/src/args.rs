use std::path::PathBuf;

use clap::Args;

use crate::types::{output_exports::OutputExports, platform::Platform};

#[derive(Args, Debug, Default)]
pub struct InputArgs {
  /// JSON config file. `esmpack.config.json` is picked up when it exists.
  #[clap(long, short)]
  pub config: Option<PathBuf>,

  #[clap(long, short)]
  pub input: Option<String>,

  #[clap(long)]
  pub cwd: Option<PathBuf>,

  #[clap(long, short)]
  pub platform: Option<Platform>,

  /// Keep imports of this module instead of bundling it. Can be repeated.
  #[clap(long, action = clap::ArgAction::Append)]
  pub external: Vec<String>,

  /// Apply a plugin, in the given order. Replaces the plugins of the config file.
  #[clap(long, action = clap::ArgAction::Append)]
  pub plugin: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
  #[clap(long, short = 'o')]
  pub file: Option<String>,

  /// One of "es", "cjs" or "iife".
  #[clap(long, short)]
  pub format: Option<String>,

  /// Global variable name of "iife" bundles.
  #[clap(long, short)]
  pub name: Option<String>,

  #[clap(long)]
  pub exports: Option<OutputExports>,

  #[clap(long)]
  pub banner: Option<String>,

  #[clap(long)]
  pub footer: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct LogArgs {
  #[clap(long, short, conflicts_with = "silent")]
  pub verbose: bool,

  /// Only report errors.
  #[clap(long, short)]
  pub silent: bool,
}
