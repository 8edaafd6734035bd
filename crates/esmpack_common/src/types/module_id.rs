use std::path::Path;

use arcstr::ArcStr;
use sugar_path::SugarPath;

/// `ModuleId` is the unique string identifier for each module.
/// - Internal modules use their absolute path.
/// - External modules use the specifier they were imported with.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ModuleId(ArcStr);

impl ModuleId {
  pub fn new(value: impl Into<ArcStr>) -> Self {
    Self(value.into())
  }

  pub fn stabilize(&self, cwd: &Path) -> String {
    stabilize_module_id(&self.0, cwd)
  }

}

pub fn stabilize_module_id(module_id: &str, cwd: &Path) -> String {
  if module_id.as_path().is_absolute() {
    module_id.as_path().relative(cwd).as_path().to_slash_lossy().into_owned()
  } else {
    module_id.to_string()
  }
}

impl std::ops::Deref for ModuleId {
  type Target = str;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl AsRef<str> for ModuleId {
  fn as_ref(&self) -> &str {
    self
  }
}

impl From<ArcStr> for ModuleId {
  fn from(value: ArcStr) -> Self {
    Self::new(value)
  }
}

impl std::fmt::Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

#[test]
fn test_stabilize() {
  let cwd = Path::new("/project");
  assert_eq!(ModuleId::new("/project/lib/knex.js").stabilize(cwd), "lib/knex.js");
  assert_eq!(ModuleId::new("fs").stabilize(cwd), "fs");
}
