use esmpack_common::ImportKind;
use oxc::{
  ast::ast::{self, Expression, ModuleDeclaration},
  ast_visit::{walk, Visit},
};

use super::AstScanner;

impl<'ast> Visit<'ast> for AstScanner<'_> {
  fn visit_statement(&mut self, stmt: &ast::Statement<'ast>) {
    if let Some(decl) = stmt.as_module_declaration() {
      self.scan_module_decl(decl);
      match decl {
        // Nothing in these is a reference that survives code generation.
        ModuleDeclaration::ImportDeclaration(_) | ModuleDeclaration::ExportAllDeclaration(_) => return,
        ModuleDeclaration::ExportNamedDeclaration(decl) if decl.declaration.is_none() => return,
        _ => {}
      }
    }
    walk::walk_statement(self, stmt);
  }

  fn visit_import_expression(&mut self, expr: &ast::ImportExpression<'ast>) {
    if let Expression::StringLiteral(request) = &expr.source {
      let record = self.add_import_record(&request.value, ImportKind::DynamicImport, request.span);
      self.dynamic_imports.push((expr.span, record));
    }
    walk::walk_import_expression(self, expr);
  }

  fn visit_call_expression(&mut self, expr: &ast::CallExpression<'ast>) {
    if let Expression::Identifier(callee) = &expr.callee {
      self.callee_spans.insert(callee.span);
    }
    walk::walk_call_expression(self, expr);
  }

  fn visit_tagged_template_expression(&mut self, expr: &ast::TaggedTemplateExpression<'ast>) {
    if let Expression::Identifier(tag) = &expr.tag {
      self.callee_spans.insert(tag.span);
    }
    walk::walk_tagged_template_expression(self, expr);
  }

  fn visit_object_property(&mut self, prop: &ast::ObjectProperty<'ast>) {
    if prop.shorthand {
      if let Expression::Identifier(value) = &prop.value {
        self.shorthand_spans.insert(value.span);
      }
    }
    walk::walk_object_property(self, prop);
  }

  fn visit_identifier_reference(&mut self, ident: &ast::IdentifierReference<'ast>) {
    if self.has_module_syntax {
      self.record_import_reference(ident);
    } else if !self.uses_commonjs_globals
      && matches!(ident.name.as_str(), "require" | "module" | "exports")
      && self.is_global_reference(ident)
    {
      self.uses_commonjs_globals = true;
    }
  }
}
