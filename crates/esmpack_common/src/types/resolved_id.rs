use std::path::Path;

use arcstr::ArcStr;

use super::module_id::stabilize_module_id;

#[derive(Debug, Clone)]
pub struct ResolvedId {
  pub id: ArcStr,
  /// Mapped to `false` by a `browser` field. The module is bundled as an empty object.
  pub ignored: bool,
  pub is_external: bool,
}

impl ResolvedId {
  pub fn external(id: impl Into<ArcStr>) -> Self {
    Self { id: id.into(), ignored: false, is_external: true }
  }

  pub fn debug_id(&self, cwd: impl AsRef<Path>) -> String {
    if self.id.trim_start().starts_with("data:") {
      return format!("<{}>", self.id);
    }
    stabilize_module_id(&self.id, cwd.as_ref())
  }
}
