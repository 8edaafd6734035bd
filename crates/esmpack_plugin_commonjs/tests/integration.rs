use esmpack_error::TransformError;
use esmpack_plugin::{HookTransformArgs, Plugin};
use esmpack_plugin_commonjs::{CommonJsOptions, CommonJsPlugin};

fn transform(id: &str, code: &str) -> anyhow::Result<Option<String>> {
  let plugin = CommonJsPlugin::default();
  Ok(plugin.transform(&HookTransformArgs { id, code })?.map(|output| output.code))
}

#[test]
fn converts_knex_style_entry() {
  let code = "'use strict';\nconst Client = require('./lib/client');\nconst { inherits } = require('util');\n\
              function Knex(config) { return new Client(config); }\nKnex.Client = Client;\nmodule.exports = Knex;\n";
  let output = transform("/project/knex.js", code).unwrap().unwrap();

  assert!(output.starts_with(
    "import * as __cjs_require_0 from \"./lib/client\";\nimport * as __cjs_require_1 from \"util\";\n"
  ));
  assert!(output.contains("const Client = __cjs_interop(__cjs_require_0);"));
  assert!(output.contains("const { inherits } = __cjs_interop(__cjs_require_1);"));
  assert!(output.contains("function __cjs_interop(ns) {"));
  assert!(output.contains("__cjs_exports();\n(function (module, exports) {\n'use strict';"));
  assert!(output.contains(
    "}).call(__cjs_module.exports, __cjs_module, __cjs_module.exports);\nexport default __cjs_module.exports;\n"
  ));
  assert!(!output.contains("require("));
}

#[test]
fn repeated_specifiers_share_one_import() {
  let output = transform("/a.js", "var a = require('./x');\nvar b = require('./x');").unwrap().unwrap();
  assert_eq!(output.matches("import * as __cjs_require_0 from \"./x\";").count(), 1);
  assert!(output.contains("var a = __cjs_interop(__cjs_require_0);\nvar b = __cjs_interop(__cjs_require_0);"));
  assert!(!output.contains("__cjs_require_1"));
}

#[test]
fn exposes_static_named_exports() {
  let output = transform("/a.js", "exports.foo = 1;\nexports.bar = function () {};").unwrap().unwrap();
  assert!(output.contains("var __cjs_export_foo = __cjs_module.exports.foo;\n"));
  assert!(output.contains("export { __cjs_export_foo as foo, __cjs_export_bar as bar };\n"));
}

#[test]
fn exports_are_reachable_before_the_body_runs() {
  let output = transform("/a.js", "exports.early = 1;").unwrap().unwrap();
  // A hoisted accessor, so a module requiring this one in a cycle sees the same exports object.
  assert!(output.contains(
    "var __cjs_module;\nexport function __cjs_exports() {\n  if (!__cjs_module) __cjs_module = { exports: {} };\n  \
     return __cjs_module.exports;\n}\n__cjs_exports();\n"
  ));
  // Modules without `require` calls need no interop helper.
  assert!(!output.contains("__cjs_interop"));
}

#[test]
fn reserved_words_are_exported_through_aliases() {
  let output = transform("/a.js", "module.exports = { delete: del, get };").unwrap().unwrap();
  assert!(output.contains("export { __cjs_export_delete as delete, __cjs_export_get as get };"));
}

#[test]
fn top_level_return_is_allowed() {
  let output = transform("/a.js", "if (!global.x) return;\nmodule.exports = 1;").unwrap().unwrap();
  assert!(output.contains("if (!global.x) return;"));
}

#[test]
fn hashbang_is_dropped() {
  let output = transform("/bin.js", "#!/usr/bin/env node\nmodule.exports = 1;").unwrap().unwrap();
  assert!(!output.contains("#!"));
}

#[test]
fn es_modules_are_left_alone() {
  assert!(transform("/a.js", "import a from './a';\nexport default a;").unwrap().is_none());
  assert!(transform("/a.js", "export const a = 1;").unwrap().is_none());
}

#[test]
fn plain_scripts_are_left_alone() {
  assert!(transform("/a.js", "console.log('hello');").unwrap().is_none());
  assert!(transform("/a.js", "function f(module) { module.x = 1; }").unwrap().is_none());
}

#[test]
fn unhandled_extensions_are_skipped() {
  assert!(transform("/a.json", "module.exports = 1;").unwrap().is_none());

  let plugin = CommonJsPlugin::new(CommonJsOptions { extensions: vec![".cjs".to_string()] });
  let args = HookTransformArgs { id: "/a.js", code: "module.exports = 1;" };
  assert!(plugin.transform(&args).unwrap().is_none());
  let args = HookTransformArgs { id: "/a.cjs", code: "module.exports = 1;" };
  assert!(plugin.transform(&args).unwrap().is_some());
}

#[test]
fn dynamic_require_is_a_transform_error() {
  let err = transform("/a.js", "var name = 'x';\nmodule.exports = require(name);").unwrap_err();
  let err = err.downcast_ref::<TransformError>().unwrap();
  assert_eq!(err.plugin, "commonjs");
  assert_eq!(err.id, "/a.js");
  assert!(err.message.contains("require(name)"));
}

#[test]
fn syntax_error_is_a_transform_error() {
  let err = transform("/a.js", "module.exports = {").unwrap_err();
  assert!(err.downcast_ref::<TransformError>().is_some());
}

#[test]
fn options_deserialize_with_defaults() {
  let options: CommonJsOptions = serde_json::from_str("{}").unwrap();
  assert_eq!(options, CommonJsOptions::default());
  let options: CommonJsOptions = serde_json::from_str(r#"{ "extensions": [".cjs"] }"#).unwrap();
  assert_eq!(options.extensions, [".cjs"]);
}
