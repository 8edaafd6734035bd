mod analyzer;
mod rewrite;

use std::borrow::Cow;

use esmpack_ecmascript::EcmaCompiler;
use esmpack_error::TransformError;
use esmpack_plugin::{HookTransformArgs, HookTransformOutput, HookTransformReturn, Plugin};
use oxc::semantic::SemanticBuilder;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::analyzer::CommonJsAnalyzer;

pub const PLUGIN_NAME: &str = "commonjs";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommonJsOptions {
  /// Only modules whose id ends with one of these are converted.
  pub extensions: Vec<String>,
}

impl Default for CommonJsOptions {
  fn default() -> Self {
    Self { extensions: vec![".js".to_string(), ".cjs".to_string()] }
  }
}

/// Converts CommonJS modules into ES modules so the bundler can link them like any other module.
///
/// `require("x")` calls are hoisted into namespace imports and read back at the call site, and the
/// module body runs inside a function receiving `module` and `exports`. The resulting module default
/// exports `module.exports` and hands it to requiring modules through
/// [`esmpack_plugin::COMMONJS_EXPORTS_ACCESSOR`]. When they can be detected statically, the assigned
/// properties are also exposed as named exports.
#[derive(Debug, Default)]
pub struct CommonJsPlugin {
  options: CommonJsOptions,
}

impl CommonJsPlugin {
  pub fn new(options: CommonJsOptions) -> Self {
    Self { options }
  }

  fn is_handled(&self, id: &str) -> bool {
    self.options.extensions.iter().any(|ext| id.ends_with(ext.as_str()))
  }

  fn error(id: &str, message: String) -> anyhow::Error {
    TransformError { plugin: PLUGIN_NAME.to_string(), id: id.to_string(), message }.into()
  }
}

impl Plugin for CommonJsPlugin {
  fn name(&self) -> Cow<'static, str> {
    Cow::Borrowed(PLUGIN_NAME)
  }

  fn transform(&self, args: &HookTransformArgs<'_>) -> HookTransformReturn {
    if !self.is_handled(args.id) {
      return Ok(None);
    }

    let ast = match EcmaCompiler::parse_commonjs(args.code) {
      Ok(ast) => ast,
      // Import and export statements are not allowed in scripts.
      Err(_) if EcmaCompiler::parse(args.code).is_ok() => return Ok(None),
      Err(err) => return Err(Self::error(args.id, err.to_string())),
    };
    let program = ast.program();
    if program.body.iter().any(|stmt| stmt.as_module_declaration().is_some()) {
      return Ok(None);
    }

    let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
    let analysis = CommonJsAnalyzer::new(&scoping).analyze(program);
    if !analysis.uses_module_system {
      return Ok(None);
    }

    if let Some(span) = analysis.dynamic_requires.first() {
      let call = &args.code[span.start as usize..span.end as usize];
      return Err(Self::error(args.id, format!("dynamic require is not supported: `{call}`")));
    }
    for span in &analysis.bare_require_refs {
      warn!(id = args.id, offset = span.start, "`require` is used as a value and is left untouched");
    }

    debug!(
      id = args.id,
      requires = analysis.requires.len(),
      named_exports = analysis.named_exports.len(),
      "converting CommonJS module"
    );
    let code = rewrite::rewrite(args.code, program.hashbang.as_ref().map(|h| h.span), &analysis);
    Ok(Some(HookTransformOutput { code }))
  }
}
