use thiserror::Error;

/// A module could not be resolved. `importer` is `None` for the entry module.
#[derive(Debug, Error)]
#[error("Could not resolve \"{specifier}\"{}", importer.as_ref().map(|i| format!(" (imported by {i})")).unwrap_or_default())]
pub struct ResolutionError {
  pub specifier: String,
  pub importer: Option<String>,
  pub reason: String,
}

#[derive(Debug, Error)]
#[error("Unsupported output format \"{format}\", expected one of \"es\", \"cjs\" or \"iife\"")]
pub struct UnsupportedFormatError {
  pub format: String,
}

#[derive(Debug, Error)]
#[error("[plugin {plugin}] {id}: {message}")]
pub struct TransformError {
  pub plugin: String,
  pub id: String,
  pub message: String,
}

#[derive(Debug, Error)]
#[error("\"{name}\" is not exported by \"{importee}\", imported by \"{importer}\"")]
pub struct MissingExportError {
  pub importer: String,
  pub importee: String,
  pub name: String,
}

#[derive(Debug, Error)]
#[error("Invalid value for \"{option}\": {message}")]
pub struct InvalidOptionError {
  pub option: &'static str,
  pub message: String,
}
