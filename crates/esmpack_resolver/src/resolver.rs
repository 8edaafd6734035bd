use std::path::{Path, PathBuf};

use arcstr::ArcStr;
use dashmap::DashMap;
use itertools::Itertools;
use sugar_path::SugarPath;

use oxc_resolver::{ResolveError, ResolveOptions as OxcResolverOptions, Resolver as OxcResolver};

use esmpack_common::Platform;

#[derive(Debug)]
pub struct Resolver {
  cwd: PathBuf,
  import_resolver: OxcResolver,
  cache: DashMap<(PathBuf, String), ResolveReturn>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReturn {
  pub path: ArcStr,
  /// The path was mapped to `false` through a `browser` field.
  pub ignored: bool,
}

impl Resolver {
  pub fn new(platform: Platform, cwd: PathBuf) -> Self {
    let mut default_conditions = vec!["default".to_string()];
    let mut import_conditions = vec!["import".to_string()];

    match platform {
      Platform::Node => {
        default_conditions.push("node".to_string());
      }
      Platform::Browser => {
        default_conditions.push("browser".to_string());
      }
      Platform::Neutral => {}
    }

    import_conditions.extend(default_conditions);
    import_conditions = import_conditions.into_iter().unique().collect();

    let main_fields = match platform {
      Platform::Node => {
        vec!["main".to_string(), "module".to_string()]
      }
      Platform::Browser => vec!["browser".to_string(), "module".to_string(), "main".to_string()],
      Platform::Neutral => vec![],
    };

    let alias_fields = match platform {
      Platform::Browser => vec![vec!["browser".to_string()]],
      _ => vec![],
    };

    let resolve_options = OxcResolverOptions {
      main_fields,
      alias_fields,
      // Builtins are decided by the bundler before resolving.
      builtin_modules: false,
      condition_names: import_conditions,
      extensions: [".js", ".mjs", ".cjs", ".json"].into_iter().map(String::from).collect(),
      ..Default::default()
    };

    Self { cwd, import_resolver: OxcResolver::new(resolve_options), cache: DashMap::default() }
  }

  pub fn resolve(
    &self,
    importer: Option<&Path>,
    specifier: &str,
    is_user_defined_entry: bool,
  ) -> Result<ResolveReturn, ResolveError> {
    let dir = importer
      .and_then(|importer| importer.parent())
      .filter(|inner| inner.components().next().is_some())
      .unwrap_or(self.cwd.as_path());

    // Entries are resolved once and may use the cwd fallback below, so they skip the cache.
    let cache_key = (!is_user_defined_entry).then(|| (dir.to_path_buf(), specifier.to_string()));
    if let Some(cached) = cache_key.as_ref().and_then(|key| self.cache.get(key)) {
      return Ok(cached.value().clone());
    }

    let mut resolution = self.import_resolver.resolve(dir, specifier);

    // Handle `{ input: 'main' }` -> `<CWD>/main.{js,mjs}`
    if resolution.is_err() && is_user_defined_entry {
      let is_specifier_path_like = specifier.starts_with('.') || specifier.starts_with('/');
      if !is_specifier_path_like {
        let normalized_specifier = self.cwd.join(specifier).normalize();
        let result = self.import_resolver.resolve(dir, &normalized_specifier.to_string_lossy());
        if result.is_ok() {
          resolution = result;
        }
      }
    }

    let ret = match resolution {
      Ok(info) => {
        let full_path = info.full_path();
        let path = full_path
          .to_str()
          .ok_or_else(|| ResolveError::NotFound(full_path.to_string_lossy().into_owned()))?;
        ResolveReturn { path: path.into(), ignored: false }
      }
      Err(ResolveError::Ignored(path)) => {
        ResolveReturn { path: path.to_string_lossy().as_ref().into(), ignored: true }
      }
      Err(err) => return Err(err),
    };

    if let Some(cache_key) = cache_key {
      self.cache.insert(cache_key, ret.clone());
    }
    Ok(ret)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("knex.js"), "module.exports = {};").unwrap();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("lib/index.js"), "module.exports = 1;").unwrap();
    fs::create_dir_all(root.join("node_modules/dep")).unwrap();
    fs::write(root.join("node_modules/dep/package.json"), r#"{ "name": "dep", "main": "main.js" }"#)
      .unwrap();
    fs::write(root.join("node_modules/dep/main.js"), "module.exports = 2;").unwrap();
    dir
  }

  #[test]
  fn resolves_relative_directory_and_package() {
    let dir = fixture();
    let cwd = dir.path().canonicalize().unwrap();
    let resolver = Resolver::new(Platform::Node, cwd.clone());

    let entry = resolver.resolve(None, "./knex.js", true).unwrap();
    assert_eq!(entry.path.as_str(), cwd.join("knex.js").to_str().unwrap());

    let importer = cwd.join("knex.js");
    let lib = resolver.resolve(Some(&importer), "./lib", false).unwrap();
    assert_eq!(lib.path.as_str(), cwd.join("lib/index.js").to_str().unwrap());

    let dep = resolver.resolve(Some(&importer), "dep", false).unwrap();
    assert_eq!(dep.path.as_str(), cwd.join("node_modules/dep/main.js").to_str().unwrap());
    assert!(!dep.ignored);
  }

  #[test]
  fn bare_entry_falls_back_to_cwd() {
    let dir = fixture();
    let cwd = dir.path().canonicalize().unwrap();
    let resolver = Resolver::new(Platform::Node, cwd.clone());
    let entry = resolver.resolve(None, "knex", true).unwrap();
    assert_eq!(entry.path.as_str(), cwd.join("knex.js").to_str().unwrap());
    assert!(resolver.resolve(None, "knex", false).is_err());
  }

  #[test]
  fn missing_module_is_an_error() {
    let dir = fixture();
    let resolver = Resolver::new(Platform::Node, dir.path().to_path_buf());
    assert!(resolver.resolve(None, "./does-not-exist.js", true).is_err());
  }
}
