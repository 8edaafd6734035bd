use esmpack_plugin::COMMONJS_EXPORTS_ACCESSOR;
use esmpack_utils::{concat_string, ecmascript::to_js_string};
use oxc::span::Span;
use rustc_hash::FxHashMap;
use string_wizard::MagicString;

use crate::analyzer::CommonJsAnalysis;

const MODULE: &str = "__cjs_module";

/// Reads what `require` returns from an importee's exports: the `module.exports` of a converted
/// module, the default export of an external module namespace, or the namespace itself.
const INTEROP: &str = "function __cjs_interop(ns) {
  if (typeof ns.__cjs_exports === \"function\") return ns.__cjs_exports();
  return ns[Symbol.toStringTag] === \"Module\" && \"default\" in ns ? ns.default : ns;
}
";

/// Produces the ES module version of a CommonJS script.
pub fn rewrite(code: &str, hashbang: Option<Span>, analysis: &CommonJsAnalysis) -> String {
  let mut magic_string = MagicString::new(code);

  if let Some(hashbang) = hashbang {
    magic_string.remove(hashbang.start as usize, hashbang.end as usize);
  }

  // One namespace import per specifier, named after the order of first use. The importee is read
  // where `require` was called.
  let mut bindings: FxHashMap<&str, String> = FxHashMap::default();
  let mut imports = String::new();
  for call in &analysis.requires {
    let next = bindings.len();
    let binding = bindings.entry(call.specifier.as_str()).or_insert_with(|| {
      let binding = format!("__cjs_require_{next}");
      imports.push_str(&concat_string!("import * as ", binding, " from ", to_js_string(&call.specifier), ";\n"));
      binding
    });
    magic_string.update(
      call.span.start as usize,
      call.span.end as usize,
      concat_string!("__cjs_interop(", binding, ")"),
    );
  }

  // The accessor is hoisted, so a module requiring this one in a cycle gets the same
  // `module.exports` object this module fills.
  let mut head = concat_string!(
    imports,
    "var ",
    MODULE,
    ";\nexport function ",
    COMMONJS_EXPORTS_ACCESSOR,
    "() {\n  if (!",
    MODULE,
    ") ",
    MODULE,
    " = { exports: {} };\n  return ",
    MODULE,
    ".exports;\n}\n"
  );
  if !analysis.requires.is_empty() {
    head.push_str(INTEROP);
  }
  head.push_str(&concat_string!(COMMONJS_EXPORTS_ACCESSOR, "();\n(function (module, exports) {\n"));
  magic_string.prepend(head);

  let mut tail = concat_string!(
    "\n}).call(",
    MODULE,
    ".exports, ",
    MODULE,
    ", ",
    MODULE,
    ".exports);\nexport default ",
    MODULE,
    ".exports;\n"
  );
  if !analysis.named_exports.is_empty() {
    let mut specifiers = Vec::with_capacity(analysis.named_exports.len());
    for name in &analysis.named_exports {
      let local = concat_string!("__cjs_export_", name);
      tail.push_str(&concat_string!("var ", local, " = ", MODULE, ".exports.", name, ";\n"));
      specifiers.push(concat_string!(local, " as ", name));
    }
    tail.push_str(&concat_string!("export { ", specifiers.join(", "), " };\n"));
  }
  magic_string.append(tail);

  magic_string.to_string()
}
