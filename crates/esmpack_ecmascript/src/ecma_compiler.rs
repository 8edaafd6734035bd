use arcstr::ArcStr;
use oxc::{
  parser::{ParseOptions, Parser},
  span::SourceType,
};

use crate::ecma_ast::{
  program_cell::{ProgramCell, ProgramCellDependent, ProgramCellOwner},
  EcmaAst,
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Parses an ES module.
  pub fn parse(source: impl Into<ArcStr>) -> anyhow::Result<EcmaAst> {
    Self::parse_with(source.into(), SourceType::mjs(), ParseOptions::default())
  }

  /// Parses a CommonJS script, where a top level `return` is legal.
  pub fn parse_commonjs(source: impl Into<ArcStr>) -> anyhow::Result<EcmaAst> {
    Self::parse_with(
      source.into(),
      SourceType::cjs(),
      ParseOptions { allow_return_outside_function: true, ..ParseOptions::default() },
    )
  }

  fn parse_with(
    source: ArcStr,
    source_type: SourceType,
    options: ParseOptions,
  ) -> anyhow::Result<EcmaAst> {
    let allocator = oxc::allocator::Allocator::default();
    let owner = ProgramCellOwner { source, allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).with_options(options).parse();
      if ret.panicked || !ret.errors.is_empty() {
        let messages = ret.errors.iter().map(ToString::to_string).collect::<Vec<_>>();
        Err(anyhow::anyhow!("{}", messages.join("\n")))
      } else {
        Ok(ProgramCellDependent { program: ret.program })
      }
    })?;

    Ok(EcmaAst { program, source_type })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_module() {
    let ast = EcmaCompiler::parse("import a from './a';\nexport default a;").unwrap();
    assert_eq!(ast.program().body.len(), 2);
    assert_eq!(ast.source().as_str(), "import a from './a';\nexport default a;");
  }

  #[test]
  fn commonjs_allows_top_level_return() {
    assert!(EcmaCompiler::parse_commonjs("if (x) return;\nmodule.exports = 1;").is_ok());
    assert!(EcmaCompiler::parse("if (x) return;").is_err());
  }

  #[test]
  fn reports_syntax_errors() {
    let err = EcmaCompiler::parse("const = ;").unwrap_err();
    assert!(!err.to_string().is_empty());
  }
}
