pub mod external_module;
pub mod normal_module;

use crate::{ExternalModule, ModuleId, NormalModule};

#[derive(Debug)]
pub enum Module {
  Normal(Box<NormalModule>),
  External(Box<ExternalModule>),
}

impl Module {
  pub fn id(&self) -> &ModuleId {
    match self {
      Module::Normal(v) => &v.id,
      Module::External(v) => &v.id,
    }
  }

  pub fn as_normal(&self) -> Option<&NormalModule> {
    match self {
      Module::Normal(v) => Some(v),
      Module::External(_) => None,
    }
  }

  pub fn as_external(&self) -> Option<&ExternalModule> {
    match self {
      Module::External(v) => Some(v),
      Module::Normal(_) => None,
    }
  }

  pub fn is_external(&self) -> bool {
    matches!(self, Module::External(_))
  }
}

impl From<NormalModule> for Module {
  fn from(module: NormalModule) -> Self {
    Module::Normal(Box::new(module))
  }
}

impl From<ExternalModule> for Module {
  fn from(module: ExternalModule) -> Self {
    Module::External(Box::new(module))
  }
}

#[test]
fn external_modules_are_viewed_as_external() {
  let module = Module::from(ExternalModule::new(crate::ModuleIdx::from_usize(0), ModuleId::new("util")));
  assert!(module.is_external());
  assert!(module.as_normal().is_none());
  assert_eq!(module.as_external().map(|external| &*external.id), Some("util"));
}
