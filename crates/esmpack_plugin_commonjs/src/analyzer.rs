use oxc::{
  ast::ast::{
    self, Argument, AssignmentOperator, AssignmentTarget, Expression, IdentifierReference,
    ObjectPropertyKind, Statement,
  },
  ast_visit::{walk, Visit},
  semantic::Scoping,
  span::Span,
};
use rustc_hash::FxHashSet;

use esmpack_utils::ecmascript::is_validate_identifier_name;

/// A `require("./x")` call with a static specifier.
#[derive(Debug)]
pub struct RequireCall {
  pub span: Span,
  pub specifier: String,
}

#[derive(Debug, Default)]
pub struct CommonJsAnalysis {
  pub requires: Vec<RequireCall>,
  /// `require(expr)` calls whose specifier is only known at runtime.
  pub dynamic_requires: Vec<Span>,
  /// `require` used as a value, e.g. `require.resolve` or `typeof require`.
  pub bare_require_refs: Vec<Span>,
  /// The module refers to the free `require`, `module` or `exports` bindings.
  pub uses_module_system: bool,
  pub named_exports: Vec<String>,
}

/// Collects the module system usage of a CommonJS script. Only references that are not shadowed by a
/// local binding count.
pub struct CommonJsAnalyzer<'me> {
  scoping: &'me Scoping,
  result: CommonJsAnalysis,
}

impl<'me> CommonJsAnalyzer<'me> {
  pub fn new(scoping: &'me Scoping) -> Self {
    Self { scoping, result: CommonJsAnalysis::default() }
  }

  pub fn analyze(mut self, program: &ast::Program<'_>) -> CommonJsAnalysis {
    self.visit_program(program);
    self.result.named_exports = self.collect_named_exports(program);
    self.result
  }

  fn is_global(&self, ident: &IdentifierReference) -> bool {
    self.scoping.get_reference(ident.reference_id()).symbol_id().is_none()
  }

  fn is_global_named(&self, expr: &Expression, name: &str) -> bool {
    matches!(expr, Expression::Identifier(ident) if ident.name.as_str() == name && self.is_global(ident))
  }

  /// `exports` or `module.exports`
  fn is_exports_object(&self, expr: &Expression) -> bool {
    match expr {
      Expression::StaticMemberExpression(member) => {
        member.property.name.as_str() == "exports" && self.is_global_named(&member.object, "module")
      }
      _ => self.is_global_named(expr, "exports"),
    }
  }

  /// Names assigned at the top level through `exports.x = ...`, `module.exports.x = ...` and
  /// `module.exports = { x, ... }`.
  fn collect_named_exports(&self, program: &ast::Program<'_>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut names = vec![];
    let mut add = |name: &str| {
      if name != "default"
        && name != "__esModule"
        && is_validate_identifier_name(name)
        && seen.insert(name.to_string())
      {
        names.push(name.to_string());
      }
    };

    for stmt in &program.body {
      let Statement::ExpressionStatement(stmt) = stmt else { continue };
      let Expression::AssignmentExpression(assign) = &stmt.expression else { continue };
      if assign.operator != AssignmentOperator::Assign {
        continue;
      }
      let AssignmentTarget::StaticMemberExpression(member) = &assign.left else { continue };

      if self.is_exports_object(&member.object) {
        add(member.property.name.as_str());
      } else if member.property.name.as_str() == "exports"
        && self.is_global_named(&member.object, "module")
      {
        if let Expression::ObjectExpression(object) = &assign.right {
          for property in &object.properties {
            if let ObjectPropertyKind::ObjectProperty(property) = property {
              if let Some(name) = property.key.static_name() {
                add(&name);
              }
            }
          }
        }
      }
    }

    names
  }
}

fn static_specifier(arguments: &[Argument]) -> Option<String> {
  match arguments {
    [Argument::StringLiteral(literal)] => Some(literal.value.to_string()),
    [Argument::TemplateLiteral(template)] if template.expressions.is_empty() => {
      template.quasis.first().and_then(|quasi| quasi.value.cooked.as_ref()).map(ToString::to_string)
    }
    _ => None,
  }
}

impl<'ast> Visit<'ast> for CommonJsAnalyzer<'_> {
  fn visit_call_expression(&mut self, expr: &ast::CallExpression<'ast>) {
    if let Expression::Identifier(callee) = &expr.callee {
      if callee.name.as_str() == "require" && self.is_global(callee) {
        self.result.uses_module_system = true;
        match static_specifier(&expr.arguments) {
          Some(specifier) => self.result.requires.push(RequireCall { span: expr.span, specifier }),
          None => self.result.dynamic_requires.push(expr.span),
        }
        return;
      }
    }
    walk::walk_call_expression(self, expr);
  }

  fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'ast>) {
    match ident.name.as_str() {
      "module" | "exports" if self.is_global(ident) => {
        self.result.uses_module_system = true;
      }
      "require" if self.is_global(ident) => {
        self.result.uses_module_system = true;
        self.result.bare_require_refs.push(ident.span);
      }
      _ => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use esmpack_ecmascript::EcmaCompiler;
  use oxc::semantic::SemanticBuilder;

  use super::*;

  fn analyze(code: &str) -> CommonJsAnalysis {
    let ast = EcmaCompiler::parse_commonjs(code).unwrap();
    let scoping = SemanticBuilder::new().build(ast.program()).semantic.into_scoping();
    CommonJsAnalyzer::new(&scoping).analyze(ast.program())
  }

  #[test]
  fn finds_static_requires_in_order() {
    let analysis = analyze("const a = require('./a');\nfunction f() { return require(`b`); }");
    let specifiers = analysis.requires.iter().map(|call| call.specifier.as_str()).collect::<Vec<_>>();
    assert_eq!(specifiers, ["./a", "b"]);
    assert!(analysis.uses_module_system);
    assert!(analysis.dynamic_requires.is_empty());
  }

  #[test]
  fn shadowed_require_is_ignored() {
    let analysis = analyze("function load(require) { return require('./a'); }");
    assert!(analysis.requires.is_empty());
    assert!(!analysis.uses_module_system);
  }

  #[test]
  fn dynamic_and_bare_requires() {
    let analysis = analyze("const name = './a';\nrequire(name);\nrequire.resolve('./b');");
    assert_eq!(analysis.dynamic_requires.len(), 1);
    assert_eq!(analysis.bare_require_refs.len(), 1);
  }

  #[test]
  fn collects_named_exports() {
    let analysis = analyze(
      "exports.a = 1;\nmodule.exports.b = 2;\nexports.a = 3;\nexports.default = 4;\n\
       module.exports = { c, 'd-e': 5, f: 6, ...rest };\nfunction g() { exports.h = 1; }",
    );
    assert_eq!(analysis.named_exports, ["a", "b", "c", "f"]);
  }
}
