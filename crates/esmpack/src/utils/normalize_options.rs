use std::path::PathBuf;

use esmpack_common::{BuildDescriptor, BuildOptions, OutputFormat, Platform};
use esmpack_error::{BuildResult, InvalidOptionError};
use esmpack_utils::ecmascript::is_validate_identifier_name;
use sugar_path::SugarPath;

/// Turns user facing options into the immutable descriptor of a build.
pub fn normalize_options(raw_options: BuildOptions) -> BuildResult<BuildDescriptor> {
  let input = raw_options
    .input
    .filter(|input| !input.is_empty())
    .ok_or(InvalidOptionError { option: "input", message: "an entry module is required".into() })?;

  let file = raw_options
    .file
    .filter(|file| !file.is_empty())
    .ok_or(InvalidOptionError { option: "file", message: "an output path is required".into() })?;

  if let Some(name) = raw_options.name.as_deref() {
    if !is_validate_identifier_name(name) {
      Err(InvalidOptionError {
        option: "name",
        message: format!("{name:?} is not a valid JavaScript identifier"),
      })?;
    }
  }

  let format = raw_options.format.unwrap_or(OutputFormat::Esm);
  let platform = raw_options.platform.unwrap_or_else(|| Platform::default_for(format));

  let cwd = match raw_options.cwd {
    Some(cwd) if cwd.is_absolute() => cwd,
    Some(cwd) => cwd.absolutize(),
    None => std::env::current_dir().map_err(|err| InvalidOptionError {
      option: "cwd",
      message: format!("failed to read the current directory: {err}"),
    })?,
  };
  // Resolved module paths are canonical, so the root they are relative to is too.
  let cwd: PathBuf = cwd.canonicalize().unwrap_or(cwd);

  Ok(BuildDescriptor {
    input,
    cwd,
    platform,
    external: raw_options.external.unwrap_or_default(),
    file,
    format,
    name: raw_options.name,
    exports: raw_options.exports.unwrap_or_default(),
    banner: raw_options.banner,
    footer: raw_options.footer,
    plugins: raw_options.plugins,
  })
}

#[cfg(test)]
mod tests {
  use esmpack_common::OutputExports;

  use super::*;

  fn options() -> BuildOptions {
    BuildOptions {
      input: Some("./knex.js".to_string()),
      file: Some("knex-es.js".to_string()),
      cwd: Some(PathBuf::from("/does/not/exist")),
      ..Default::default()
    }
  }

  #[test]
  fn fills_in_defaults() {
    let descriptor = normalize_options(options()).unwrap();
    assert_eq!(descriptor.input, "./knex.js");
    assert_eq!(descriptor.file, "knex-es.js");
    assert_eq!(descriptor.format, OutputFormat::Esm);
    assert_eq!(descriptor.platform, Platform::Node);
    assert_eq!(descriptor.exports, OutputExports::Auto);
    assert_eq!(descriptor.cwd, PathBuf::from("/does/not/exist"));
    assert!(descriptor.plugins.is_empty());
  }

  #[test]
  fn iife_targets_the_browser() {
    let descriptor =
      normalize_options(BuildOptions { format: Some(OutputFormat::Iife), ..options() }).unwrap();
    assert_eq!(descriptor.platform, Platform::Browser);
  }

  #[test]
  fn requires_input_and_file() {
    let err = normalize_options(BuildOptions { input: None, ..options() }).unwrap_err();
    assert_eq!(err.find::<InvalidOptionError>().map(|err| err.option), Some("input"));

    let err = normalize_options(BuildOptions { file: Some(String::new()), ..options() }).unwrap_err();
    assert_eq!(err.find::<InvalidOptionError>().map(|err| err.option), Some("file"));
  }

  #[test]
  fn rejects_invalid_global_name() {
    let err =
      normalize_options(BuildOptions { name: Some("my-lib".to_string()), ..options() }).unwrap_err();
    assert!(err.contains::<InvalidOptionError>());
  }
}
