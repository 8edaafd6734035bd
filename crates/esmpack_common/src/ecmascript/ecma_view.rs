use arcstr::ArcStr;
use oxc::span::Span;

use crate::{ImportRecordIdx, ImportReference, ModuleDecl};

/// What the scanner learned about a module's final (post-transform) code.
#[derive(Debug, Default)]
pub struct EcmaView {
  pub source: ArcStr,
  pub decls: Vec<ModuleDecl>,
  /// `import('./a')` expressions with a string literal argument.
  pub dynamic_imports: Vec<(Span, ImportRecordIdx)>,
  /// Every place the module body reads a named or default import.
  pub import_references: Vec<ImportReference>,
  pub hashbang: Option<Span>,
  pub has_module_syntax: bool,
  /// The code refers to `require`, `module` or `exports` without declaring them.
  pub uses_commonjs_globals: bool,
}

impl EcmaView {
  /// Own export names in declaration order, without the names coming from `export *`.
  pub fn local_export_names(&self) -> impl Iterator<Item = &str> {
    self.decls.iter().flat_map(ModuleDecl::export_names)
  }

  pub fn star_export_records(&self) -> impl Iterator<Item = ImportRecordIdx> + '_ {
    self.decls.iter().filter_map(|decl| match decl {
      ModuleDecl::ReExportAll { record, .. } => Some(*record),
      _ => None,
    })
  }

  pub fn has_default_export(&self) -> bool {
    self.local_export_names().any(|name| name == "default")
  }
}
