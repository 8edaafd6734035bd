use esmpack_common::{OutputExports, SourceJoiner};
use esmpack_error::{BuildResult, InvalidOptionError};
use esmpack_utils::concat_string;

use crate::generate_stage::{
  determine_export_mode::determine_export_mode, runtime::RuntimeHelpers, GenerateContext,
};

pub fn render_iife<'code>(
  ctx: &GenerateContext<'_>,
  module_sources: &'code [String],
  helpers: &RuntimeHelpers,
  warnings: &mut Vec<anyhow::Error>,
) -> BuildResult<SourceJoiner<'code>> {
  let name = ctx.options.name.as_deref();
  let export_names = &ctx.entry_exports().names;
  let commonjs_exports = ctx.entry_commonjs_exports();
  let export_mode = if commonjs_exports.is_some() {
    OutputExports::Default
  } else {
    determine_export_mode(warnings, ctx.options.exports, ctx.entry, export_names, name.unwrap_or("bundle"))?
  };

  let mut source_joiner = SourceJoiner::default();
  match (export_mode, name) {
    (OutputExports::None, _) => source_joiner.append_source("(function () {"),
    (_, Some(name)) => source_joiner.append_source(concat_string!("var ", name, " = (function () {")),
    (_, None) => Err(InvalidOptionError {
      option: "name",
      message: format!(
        "\"iife\" output needs a global name because entry module \"{}\" has exports",
        ctx.entry.stable_id
      ),
    })?,
  }
  source_joiner.append_source("\"use strict\";");

  helpers.append_to(&mut source_joiner);
  for source in module_sources {
    source_joiner.append_source(source.as_str());
  }

  let init_call = ctx.entry_init_call();
  source_joiner.append_source(match (export_mode, commonjs_exports) {
    (_, Some(commonjs_exports)) => concat_string!("return ", commonjs_exports, ";"),
    (OutputExports::Default, None) => concat_string!("return ", init_call, ".default;"),
    (OutputExports::Named, None) => concat_string!("return ", init_call, ";"),
    (OutputExports::None | OutputExports::Auto, None) => concat_string!(init_call, ";"),
  });
  source_joiner.append_source("})();");

  Ok(source_joiner)
}
