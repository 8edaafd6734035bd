use oxc::span::Span;

use crate::ImportRecordIdx;

/// A single binding introduced by an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBinding {
  /// `import foo from './foo'`
  Default { local: String },
  /// `import { foo as bar } from './foo'`
  Named { imported: String, local: String },
  /// `import * as foo from './foo'`
  Namespace { local: String },
}

impl ImportBinding {
  pub fn local(&self) -> &str {
    match self {
      Self::Default { local } | Self::Named { local, .. } | Self::Namespace { local } => local,
    }
  }

  /// The export name required from the importee. `None` for namespace imports.
  pub fn imported(&self) -> Option<&str> {
    match self {
      Self::Default { .. } => Some("default"),
      Self::Named { imported, .. } => Some(imported),
      Self::Namespace { .. } => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportReferenceKind {
  Read,
  /// `foo()`, rewritten so the call does not receive the namespace as `this`.
  Callee,
  /// `{ foo }` in an object literal.
  Shorthand,
}

/// A reference to a binding created by a named or default import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReference {
  pub span: Span,
  pub local: String,
  pub kind: ImportReferenceKind,
}

/// Top level import/export statements of an ES module, kept with the spans needed to strip or
/// rewrite them during code generation.
#[derive(Debug, Clone)]
pub enum ModuleDecl {
  /// `import a, { b } from './a'`, `import * as ns from './a'`, `import './a'`
  Import { span: Span, record: ImportRecordIdx, bindings: Vec<ImportBinding> },
  /// `export const a = 1, b = 2;`, `export function f() {}`, `export class C {}`
  ExportDeclaration { span: Span, declaration_start: u32, names: Vec<String> },
  /// `export default function f() {}` or `export default class C {}`
  ExportDefaultDeclaration { span: Span, declaration_start: u32, local: String },
  /// `export default <expression>`, including anonymous functions and classes
  ExportDefaultExpression { span: Span, expression_start: u32 },
  /// `export { a, b as c }`, pairs of `(local, exported)`
  ExportNamed { span: Span, specifiers: Vec<(String, String)> },
  /// `export { a, b as c } from './a'`, pairs of `(imported, exported)`
  ReExportNamed { span: Span, record: ImportRecordIdx, specifiers: Vec<(String, String)> },
  /// `export * as ns from './a'`
  ReExportNamespace { span: Span, record: ImportRecordIdx, exported: String },
  /// `export * from './a'`
  ReExportAll { span: Span, record: ImportRecordIdx },
}

impl ModuleDecl {
  pub fn span(&self) -> Span {
    match self {
      Self::Import { span, .. }
      | Self::ExportDeclaration { span, .. }
      | Self::ExportDefaultDeclaration { span, .. }
      | Self::ExportDefaultExpression { span, .. }
      | Self::ExportNamed { span, .. }
      | Self::ReExportNamed { span, .. }
      | Self::ReExportNamespace { span, .. }
      | Self::ReExportAll { span, .. } => *span,
    }
  }

  pub fn record(&self) -> Option<ImportRecordIdx> {
    match self {
      Self::Import { record, .. }
      | Self::ReExportNamed { record, .. }
      | Self::ReExportNamespace { record, .. }
      | Self::ReExportAll { record, .. } => Some(*record),
      _ => None,
    }
  }

  /// Names this statement adds to the module's own exports. `export *` contributes nothing here.
  pub fn export_names(&self) -> Vec<&str> {
    match self {
      Self::ExportDeclaration { names, .. } => names.iter().map(String::as_str).collect(),
      Self::ExportDefaultDeclaration { .. } | Self::ExportDefaultExpression { .. } => {
        vec!["default"]
      }
      Self::ExportNamed { specifiers, .. } | Self::ReExportNamed { specifiers, .. } => {
        specifiers.iter().map(|(_, exported)| exported.as_str()).collect()
      }
      Self::ReExportNamespace { exported, .. } => vec![exported.as_str()],
      Self::Import { .. } | Self::ReExportAll { .. } => vec![],
    }
  }
}
