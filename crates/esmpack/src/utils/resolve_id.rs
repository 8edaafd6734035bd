use std::path::Path;

use esmpack_common::{BuildDescriptor, Platform, ResolvedId};
use esmpack_error::ResolutionError;
use esmpack_plugin::{HookResolveIdArgs, PluginDriver};
use esmpack_resolver::{is_node_builtin_module, Resolver};

#[inline]
fn is_http_url(s: &str) -> bool {
  s.starts_with("http://") || s.starts_with("https://") || s.starts_with("//")
}

#[inline]
fn is_data_url(s: &str) -> bool {
  s.trim_start().starts_with("data:")
}

#[inline]
fn is_path_like(s: &str) -> bool {
  s.starts_with('.') || s.starts_with('/') || Path::new(s).is_absolute()
}

pub struct ResolveIdContext<'a> {
  pub options: &'a BuildDescriptor,
  pub resolver: &'a Resolver,
  pub plugin_driver: &'a PluginDriver,
}

/// Resolves `specifier` the way the bundle will see it at runtime.
///
/// `importer` is the absolute id of the importing module and `importer_stable_id` its display
/// name; both are `None` for the entry. Bare specifiers that cannot be found are kept external and
/// reported through `warnings`.
pub fn resolve_id(
  ctx: &ResolveIdContext<'_>,
  specifier: &str,
  importer: Option<(&str, &str)>,
  warnings: &mut Vec<anyhow::Error>,
) -> anyhow::Result<ResolvedId> {
  let is_entry = importer.is_none();

  if !is_entry && ctx.options.is_external(specifier) {
    return Ok(ResolvedId::external(specifier));
  }

  let args = HookResolveIdArgs { specifier, importer: importer.map(|(id, _)| id), is_entry };
  if let Some(resolved) = ctx.plugin_driver.resolve_id(&args)? {
    return Ok(ResolvedId { id: resolved.id.into(), ignored: false, is_external: resolved.external });
  }

  // Auto external http url or data url
  if is_http_url(specifier) || is_data_url(specifier) {
    return Ok(ResolvedId::external(specifier));
  }

  if matches!(ctx.options.platform, Platform::Node) && is_node_builtin_module(specifier) {
    return Ok(ResolvedId::external(specifier));
  }

  match ctx.resolver.resolve(importer.map(|(id, _)| Path::new(id)), specifier, is_entry) {
    Ok(resolved) => {
      Ok(ResolvedId { id: resolved.path, ignored: resolved.ignored, is_external: false })
    }
    Err(_) if !is_entry && !is_path_like(specifier) => {
      warnings.push(anyhow::anyhow!(
        "Could not resolve \"{specifier}\" (imported by {}), treating it as an external dependency.",
        importer.map_or("", |(_, stable_id)| stable_id)
      ));
      Ok(ResolvedId::external(specifier))
    }
    Err(err) => Err(
      ResolutionError {
        specifier: specifier.to_string(),
        importer: importer.map(|(_, stable_id)| stable_id.to_string()),
        reason: err.to_string(),
      }
      .into(),
    ),
  }
}

#[cfg(test)]
mod tests {
  use std::{fs, path::PathBuf};

  use esmpack_common::{OutputExports, OutputFormat};

  use super::*;

  fn descriptor(cwd: PathBuf, platform: Platform) -> BuildDescriptor {
    BuildDescriptor {
      input: "./index.js".to_string(),
      cwd,
      platform,
      external: vec!["pg".to_string()],
      file: "out.js".to_string(),
      format: OutputFormat::Esm,
      name: None,
      exports: OutputExports::Auto,
      banner: None,
      footer: None,
      plugins: vec![],
    }
  }

  #[test]
  fn classifies_specifiers() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().canonicalize().unwrap();
    fs::write(cwd.join("index.js"), "").unwrap();
    fs::write(cwd.join("a.js"), "").unwrap();

    let options = descriptor(cwd.clone(), Platform::Node);
    let resolver = Resolver::new(Platform::Node, cwd.clone());
    let plugin_driver = PluginDriver::default();
    let ctx = ResolveIdContext { options: &options, resolver: &resolver, plugin_driver: &plugin_driver };
    let importer = cwd.join("index.js");
    let importer = Some((importer.to_str().unwrap(), "index.js"));
    let mut warnings = vec![];

    let local = resolve_id(&ctx, "./a", importer, &mut warnings).unwrap();
    assert_eq!(local.id.as_str(), cwd.join("a.js").to_str().unwrap());
    assert!(!local.is_external);

    assert!(resolve_id(&ctx, "pg/lib/native", importer, &mut warnings).unwrap().is_external);
    assert!(resolve_id(&ctx, "fs", importer, &mut warnings).unwrap().is_external);
    assert!(resolve_id(&ctx, "node:path", importer, &mut warnings).unwrap().is_external);
    assert!(resolve_id(&ctx, "https://cdn/x.js", importer, &mut warnings).unwrap().is_external);
    assert!(warnings.is_empty());

    let missing_package = resolve_id(&ctx, "lodash", importer, &mut warnings).unwrap();
    assert!(missing_package.is_external);
    assert_eq!(warnings.len(), 1);

    let err = resolve_id(&ctx, "./missing", importer, &mut warnings).unwrap_err();
    let err = err.downcast_ref::<ResolutionError>().unwrap();
    assert_eq!(err.specifier, "./missing");
    assert_eq!(err.importer.as_deref(), Some("index.js"));
  }

  #[test]
  fn missing_entry_is_a_resolution_error() {
    let dir = tempfile::tempdir().unwrap();
    let options = descriptor(dir.path().to_path_buf(), Platform::Node);
    let resolver = Resolver::new(Platform::Node, dir.path().to_path_buf());
    let plugin_driver = PluginDriver::default();
    let ctx = ResolveIdContext { options: &options, resolver: &resolver, plugin_driver: &plugin_driver };

    let err = resolve_id(&ctx, "knex", None, &mut vec![]).unwrap_err();
    let err = err.downcast_ref::<ResolutionError>().unwrap();
    assert_eq!(err.specifier, "knex");
    assert!(err.importer.is_none());
  }

  #[test]
  fn builtins_are_bundled_for_the_browser() {
    let dir = tempfile::tempdir().unwrap();
    let options = descriptor(dir.path().to_path_buf(), Platform::Browser);
    let resolver = Resolver::new(Platform::Browser, dir.path().to_path_buf());
    let plugin_driver = PluginDriver::default();
    let ctx = ResolveIdContext { options: &options, resolver: &resolver, plugin_driver: &plugin_driver };
    let mut warnings = vec![];

    // Nothing provides `fs` here, so it falls back to an external with a warning.
    assert!(resolve_id(&ctx, "fs", Some(("/x/index.js", "index.js")), &mut warnings).unwrap().is_external);
    assert_eq!(warnings.len(), 1);
  }
}
