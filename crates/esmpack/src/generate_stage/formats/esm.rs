use esmpack_common::SourceJoiner;
use esmpack_utils::{
  concat_string,
  ecmascript::{is_validate_identifier_name, property_access_str, to_js_string, to_module_import_export_name},
};

use crate::generate_stage::{runtime::RuntimeHelpers, GenerateContext};

pub fn render_esm<'code>(
  ctx: &GenerateContext<'_>,
  module_sources: &'code [String],
  helpers: &RuntimeHelpers,
) -> SourceJoiner<'code> {
  let mut source_joiner = SourceJoiner::default();

  for &idx in &ctx.externals {
    let specifier = ctx.link_output.module_table[idx].id();
    source_joiner.append_source(concat_string!(
      "import * as ",
      ctx.binding_name(idx),
      " from ",
      to_js_string(specifier),
      ";"
    ));
  }

  helpers.append_to(&mut source_joiner);
  for source in module_sources {
    source_joiner.append_source(source.as_str());
  }
  source_joiner.append_source(render_esm_exports(ctx));

  source_joiner
}

/// Runs the entry and re-exports what it exports.
fn render_esm_exports(ctx: &GenerateContext<'_>) -> String {
  let exports = ctx.entry_exports();
  let init_call = ctx.entry_init_call();
  if exports.names.is_empty() && exports.external_stars.is_empty() {
    return concat_string!(init_call, ";");
  }

  let mut lines = vec![concat_string!("var __esmpack_entry = ", init_call, ";")];
  let mut specifiers = vec![];
  for (index, name) in exports.names.iter().enumerate() {
    if name == "default" {
      lines.push("export default __esmpack_entry.default;".to_string());
      continue;
    }
    let local = if is_validate_identifier_name(name) {
      concat_string!("__esmpack_export_", name)
    } else {
      format!("__esmpack_export_{index}")
    };
    lines.push(concat_string!("var ", local, " = ", property_access_str("__esmpack_entry", name), ";"));
    specifiers.push(concat_string!(local, " as ", to_module_import_export_name(name)));
  }
  if !specifiers.is_empty() {
    lines.push(concat_string!("export { ", specifiers.join(", "), " };"));
  }
  for &idx in &exports.external_stars {
    lines.push(concat_string!("export * from ", to_js_string(ctx.link_output.module_table[idx].id()), ";"));
  }

  lines.join("\n")
}
