use std::path::Path;

use esmpack_common::ResolvedId;
use esmpack_fs::FileSystem;
use esmpack_plugin::{HookLoadArgs, PluginDriver, COMMONJS_EXPORTS_ACCESSOR};
use esmpack_utils::concat_string;

/// Loads the code of an internal module, giving `load` hooks the first chance.
pub fn load_source(
  fs: &dyn FileSystem,
  plugin_driver: &PluginDriver,
  resolved_id: &ResolvedId,
) -> anyhow::Result<String> {
  if let Some(loaded) = plugin_driver.load(&HookLoadArgs { id: &resolved_id.id })? {
    return Ok(loaded.code);
  }

  if resolved_id.ignored {
    return Ok("export default {};".to_string());
  }

  let code = fs.read_to_string(Path::new(resolved_id.id.as_str()))?;
  if resolved_id.id.ends_with(".json") {
    serde_json::from_str::<serde_json::Value>(&code)
      .map_err(|err| anyhow::anyhow!("Invalid JSON in {}: {err}", resolved_id.id.as_str()))?;
    // `require` of a JSON file returns the parsed value itself.
    return Ok(concat_string!(
      "var __esmpack_json = ",
      code.trim(),
      ";\nexport default __esmpack_json;\nexport function ",
      COMMONJS_EXPORTS_ACCESSOR,
      "() {\n  return __esmpack_json;\n}\n"
    ));
  }
  Ok(code)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use esmpack_fs::OsFileSystem;

  use super::*;

  #[test]
  fn wraps_json_and_ignored_modules() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("package.json");
    fs::write(&json, "{ \"version\": \"1.0.0\" }\n").unwrap();
    let driver = PluginDriver::default();

    let resolved = ResolvedId { id: json.to_str().unwrap().into(), ignored: false, is_external: false };
    assert_eq!(
      load_source(&OsFileSystem, &driver, &resolved).unwrap(),
      "var __esmpack_json = { \"version\": \"1.0.0\" };\nexport default __esmpack_json;\n\
       export function __cjs_exports() {\n  return __esmpack_json;\n}\n"
    );

    let ignored = ResolvedId { id: "/nowhere/fs.js".into(), ignored: true, is_external: false };
    assert_eq!(load_source(&OsFileSystem, &driver, &ignored).unwrap(), "export default {};");
  }

  #[test]
  fn empty_or_malformed_json_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let driver = PluginDriver::default();
    for (name, content) in [("empty.json", ""), ("broken.json", "{ \"a\": }")] {
      let path = dir.path().join(name);
      fs::write(&path, content).unwrap();
      let resolved = ResolvedId { id: path.to_str().unwrap().into(), ignored: false, is_external: false };
      let err = load_source(&OsFileSystem, &driver, &resolved).unwrap_err();
      assert!(err.to_string().starts_with("Invalid JSON in "), "{err}");
    }
  }

  #[test]
  fn missing_file_is_an_error() {
    let resolved = ResolvedId { id: "/nowhere/a.js".into(), ignored: false, is_external: false };
    assert!(load_source(&OsFileSystem, &PluginDriver::default(), &resolved).is_err());
  }
}
