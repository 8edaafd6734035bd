use esmpack_common::{OutputExports, SourceJoiner};
use esmpack_error::BuildResult;
use esmpack_utils::{concat_string, ecmascript::to_js_string};

use crate::generate_stage::{
  determine_export_mode::determine_export_mode, runtime::RuntimeHelpers, GenerateContext,
};

pub fn render_cjs<'code>(
  ctx: &GenerateContext<'_>,
  module_sources: &'code [String],
  helpers: &mut RuntimeHelpers,
  warnings: &mut Vec<anyhow::Error>,
) -> BuildResult<SourceJoiner<'code>> {
  let mut source_joiner = SourceJoiner::default();
  source_joiner.append_source("\"use strict\";");

  let export_names = &ctx.entry_exports().names;
  let commonjs_exports = ctx.entry_commonjs_exports();
  let export_mode = if commonjs_exports.is_some() {
    OutputExports::Default
  } else {
    determine_export_mode(warnings, ctx.options.exports, ctx.entry, export_names, "module.exports")?
  };

  // Runtime helpers should be placed before the generated `require`s, which rely on `__esmpack_to_esm`.
  helpers.to_esm |= !ctx.externals.is_empty();
  helpers.append_to(&mut source_joiner);
  source_joiner.append_source(render_cjs_imports(ctx));

  for source in module_sources {
    source_joiner.append_source(source.as_str());
  }

  let init_call = ctx.entry_init_call();
  let exports = match (export_mode, commonjs_exports) {
    (_, Some(commonjs_exports)) => concat_string!("module.exports = ", commonjs_exports, ";"),
    (OutputExports::Default, None) => concat_string!("module.exports = ", init_call, ".default;"),
    (OutputExports::Named, None) => {
      let mut exports = concat_string!("module.exports = ", init_call, ";");
      if export_names.iter().any(|name| name == "default") {
        exports.push_str("\nObject.defineProperty(module.exports, \"__esModule\", { value: true });");
      }
      exports
    }
    (OutputExports::None | OutputExports::Auto, None) => concat_string!(init_call, ";"),
  };
  source_joiner.append_source(exports);

  Ok(source_joiner)
}

fn render_cjs_imports(ctx: &GenerateContext<'_>) -> String {
  ctx
    .externals
    .iter()
    .map(|&idx| {
      let specifier = ctx.link_output.module_table[idx].id();
      concat_string!(
        "var ",
        ctx.binding_name(idx),
        " = __esmpack_to_esm(require(",
        to_js_string(specifier),
        "));"
      )
    })
    .collect::<Vec<_>>()
    .join("\n")
}
