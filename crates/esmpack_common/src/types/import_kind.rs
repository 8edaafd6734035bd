#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ImportKind {
  /// `import x from "x"`, `export * from "x"` and the other static forms.
  Import,
  /// `import("x")`, run lazily.
  DynamicImport,
}

impl ImportKind {
  pub fn is_static(&self) -> bool {
    matches!(self, Self::Import)
  }
}
