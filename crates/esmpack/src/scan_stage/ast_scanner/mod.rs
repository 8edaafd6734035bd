mod impl_visit;

use arcstr::ArcStr;
use esmpack_common::{
  EcmaView, ImportBinding, ImportKind, ImportRecordIdx, ImportReference, ImportReferenceKind,
  ModuleDecl, RawImportRecord,
};
use oxc::{
  ast::ast::{
    self, Declaration, ExportDefaultDeclarationKind, ImportDeclarationSpecifier, ModuleDeclaration,
    Statement,
  },
  ast_visit::Visit,
  semantic::{Scoping, SemanticBuilder, SymbolId},
  span::{GetSpan, Span},
};
use oxc_index::IndexVec;
use rustc_hash::FxHashSet;

pub struct ScanResult {
  pub ecma_view: EcmaView,
  pub import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
}

/// Collects the import/export statements, `import()` expressions and references to imported
/// bindings of a module.
pub struct AstScanner<'me> {
  source: &'me ArcStr,
  scoping: Option<Scoping>,
  has_module_syntax: bool,
  /// Symbols declared by default and named imports.
  import_symbols: FxHashSet<SymbolId>,
  callee_spans: FxHashSet<Span>,
  shorthand_spans: FxHashSet<Span>,
  decls: Vec<ModuleDecl>,
  dynamic_imports: Vec<(Span, ImportRecordIdx)>,
  import_references: Vec<ImportReference>,
  import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
  uses_commonjs_globals: bool,
}

impl<'me> AstScanner<'me> {
  pub fn new(source: &'me ArcStr) -> Self {
    Self {
      source,
      scoping: None,
      has_module_syntax: false,
      import_symbols: FxHashSet::default(),
      callee_spans: FxHashSet::default(),
      shorthand_spans: FxHashSet::default(),
      decls: vec![],
      dynamic_imports: vec![],
      import_references: vec![],
      import_records: IndexVec::default(),
      uses_commonjs_globals: false,
    }
  }

  pub fn scan(mut self, program: &ast::Program<'_>) -> ScanResult {
    self.has_module_syntax = program.body.iter().any(|stmt| stmt.as_module_declaration().is_some());
    self.scoping = Some(SemanticBuilder::new().build(program).semantic.into_scoping());

    // Imports are hoisted, so their bindings are known before any reference is visited.
    for stmt in &program.body {
      let Statement::ImportDeclaration(decl) = stmt else { continue };
      for specifier in decl.specifiers.iter().flatten() {
        if !matches!(specifier, ImportDeclarationSpecifier::ImportNamespaceSpecifier(_)) {
          self.import_symbols.insert(specifier.local().symbol_id());
        }
      }
    }

    self.visit_program(program);

    ScanResult {
      ecma_view: EcmaView {
        source: ArcStr::clone(self.source),
        decls: self.decls,
        dynamic_imports: self.dynamic_imports,
        import_references: self.import_references,
        hashbang: program.hashbang.as_ref().map(GetSpan::span),
        has_module_syntax: self.has_module_syntax,
        uses_commonjs_globals: self.uses_commonjs_globals,
      },
      import_records: self.import_records,
    }
  }

  fn add_import_record(&mut self, specifier: &str, kind: ImportKind, span: Span) -> ImportRecordIdx {
    self.import_records.push(RawImportRecord::new(specifier.into(), kind, span))
  }

  fn scan_module_decl(&mut self, decl: &ModuleDeclaration<'_>) {
    let module_decl = match decl {
      ModuleDeclaration::ImportDeclaration(decl) => {
        let record = self.add_import_record(&decl.source.value, ImportKind::Import, decl.source.span);
        let bindings = decl
          .specifiers
          .iter()
          .flatten()
          .map(|specifier| match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(spec) => ImportBinding::Named {
              imported: spec.imported.name().to_string(),
              local: spec.local.name.to_string(),
            },
            ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
              ImportBinding::Default { local: spec.local.name.to_string() }
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
              ImportBinding::Namespace { local: spec.local.name.to_string() }
            }
          })
          .collect();
        ModuleDecl::Import { span: decl.span, record, bindings }
      }
      ModuleDeclaration::ExportNamedDeclaration(decl) => {
        let specifiers = decl
          .specifiers
          .iter()
          .map(|spec| (spec.local.name().to_string(), spec.exported.name().to_string()))
          .collect();
        if let Some(source) = &decl.source {
          let record = self.add_import_record(&source.value, ImportKind::Import, source.span);
          ModuleDecl::ReExportNamed { span: decl.span, record, specifiers }
        } else if let Some(declaration) = &decl.declaration {
          ModuleDecl::ExportDeclaration {
            span: decl.span,
            declaration_start: declaration.span().start,
            names: declared_names(declaration),
          }
        } else {
          ModuleDecl::ExportNamed { span: decl.span, specifiers }
        }
      }
      ModuleDeclaration::ExportDefaultDeclaration(decl) => {
        let local = match &decl.declaration {
          ExportDefaultDeclarationKind::FunctionDeclaration(func) => func.id.as_ref(),
          ExportDefaultDeclarationKind::ClassDeclaration(class) => class.id.as_ref(),
          _ => None,
        };
        let declaration_start = decl.declaration.span().start;
        match local {
          Some(id) => ModuleDecl::ExportDefaultDeclaration {
            span: decl.span,
            declaration_start,
            local: id.name.to_string(),
          },
          None => {
            ModuleDecl::ExportDefaultExpression { span: decl.span, expression_start: declaration_start }
          }
        }
      }
      ModuleDeclaration::ExportAllDeclaration(decl) => {
        let record = self.add_import_record(&decl.source.value, ImportKind::Import, decl.source.span);
        match &decl.exported {
          Some(exported) => ModuleDecl::ReExportNamespace {
            span: decl.span,
            record,
            exported: exported.name().to_string(),
          },
          None => ModuleDecl::ReExportAll { span: decl.span, record },
        }
      }
      // TypeScript only syntax
      _ => return,
    };
    self.decls.push(module_decl);
  }

  fn resolved_symbol(&self, ident: &ast::IdentifierReference) -> Option<SymbolId> {
    self.scoping.as_ref().and_then(|scoping| scoping.get_reference(ident.reference_id()).symbol_id())
  }

  fn is_global_reference(&self, ident: &ast::IdentifierReference) -> bool {
    self.scoping.is_some() && self.resolved_symbol(ident).is_none()
  }

  fn record_import_reference(&mut self, ident: &ast::IdentifierReference) {
    if !self.resolved_symbol(ident).is_some_and(|symbol| self.import_symbols.contains(&symbol)) {
      return;
    }
    let kind = if self.shorthand_spans.contains(&ident.span) {
      ImportReferenceKind::Shorthand
    } else if self.callee_spans.contains(&ident.span) {
      ImportReferenceKind::Callee
    } else {
      ImportReferenceKind::Read
    };
    self.import_references.push(ImportReference { span: ident.span, local: ident.name.to_string(), kind });
  }
}

fn declared_names(declaration: &Declaration<'_>) -> Vec<String> {
  match declaration {
    Declaration::VariableDeclaration(decl) => decl
      .declarations
      .iter()
      .flat_map(|declarator| declarator.id.get_binding_identifiers())
      .map(|id| id.name.to_string())
      .collect(),
    Declaration::FunctionDeclaration(func) => {
      func.id.iter().map(|id| id.name.to_string()).collect()
    }
    Declaration::ClassDeclaration(class) => {
      class.id.iter().map(|id| id.name.to_string()).collect()
    }
    _ => vec![],
  }
}

#[cfg(test)]
mod tests {
  use esmpack_ecmascript::EcmaCompiler;

  use super::*;

  fn scan(code: &str) -> ScanResult {
    let source = ArcStr::from(code);
    let ast = EcmaCompiler::parse(ArcStr::clone(&source)).unwrap();
    AstScanner::new(&source).scan(ast.program())
  }

  #[test]
  fn collects_module_declarations() {
    let result = scan(
      "import d, { a as b } from './a';\nimport * as ns from './ns';\nexport const x = 1, { y } = {};\n\
       export function f() {}\nexport default class C {}\nexport { b as c };\nexport { z } from './z';\n\
       export * from './all';\nexport * as every from './all';",
    );
    let view = &result.ecma_view;
    assert!(view.has_module_syntax);
    assert!(!view.uses_commonjs_globals);
    assert_eq!(view.decls.len(), 9);
    assert_eq!(result.import_records.len(), 5);
    assert_eq!(
      view.local_export_names().collect::<Vec<_>>(),
      ["x", "y", "f", "default", "c", "z", "every"]
    );
    assert_eq!(view.star_export_records().count(), 1);

    let ModuleDecl::Import { bindings, .. } = &view.decls[0] else { panic!("expected an import") };
    assert_eq!(
      bindings,
      &[
        ImportBinding::Default { local: "d".to_string() },
        ImportBinding::Named { imported: "a".to_string(), local: "b".to_string() },
      ]
    );
  }

  #[test]
  fn anonymous_default_is_an_expression() {
    let result = scan("export default function () {}");
    assert!(matches!(result.ecma_view.decls[0], ModuleDecl::ExportDefaultExpression { expression_start: 15, .. }));
    assert!(result.ecma_view.has_default_export());
  }

  #[test]
  fn records_dynamic_imports() {
    let result = scan("export const load = () => import('./lazy');\nimport(name);");
    assert_eq!(result.ecma_view.dynamic_imports.len(), 1);
    let (_, record) = result.ecma_view.dynamic_imports[0];
    assert_eq!(result.import_records[record].specifier.as_str(), "./lazy");
    assert_eq!(result.import_records[record].kind, ImportKind::DynamicImport);
  }

  #[test]
  fn records_references_to_imported_bindings() {
    let code = "import d, { a, b as c } from './a';\nimport * as ns from './ns';\n\
                function run() { return a + c({ d }) + ns.x + d`t`; }\nexport { a };\nexport default d;";
    let result = scan(code);
    let references = result
      .ecma_view
      .import_references
      .iter()
      .map(|reference| (&code[reference.span.start as usize..reference.span.end as usize], reference.kind))
      .collect::<Vec<_>>();
    assert_eq!(
      references,
      [
        ("a", ImportReferenceKind::Read),
        ("c", ImportReferenceKind::Callee),
        ("d", ImportReferenceKind::Shorthand),
        ("d", ImportReferenceKind::Callee),
        ("d", ImportReferenceKind::Read),
      ]
    );
  }

  #[test]
  fn shadowed_import_names_are_not_references() {
    let result = scan("import { a } from './a';\nfunction f(a) { return a; }\nexport const b = () => a;");
    assert_eq!(result.ecma_view.import_references.len(), 1);
    assert_eq!(result.ecma_view.import_references[0].local, "a");
  }

  #[test]
  fn detects_commonjs_globals() {
    assert!(scan("module.exports = require('./a');").ecma_view.uses_commonjs_globals);
    assert!(!scan("function f(exports) { exports.a = 1; }").ecma_view.uses_commonjs_globals);
    assert!(!scan("export const require = 1;").ecma_view.uses_commonjs_globals);
  }
}
