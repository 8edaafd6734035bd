use std::ops::{Deref, DerefMut};

use oxc_index::IndexVec;

use crate::{EcmaView, ImportRecordIdx, ModuleId, ModuleIdx, ResolvedImportRecord};

#[derive(Debug)]
pub struct NormalModule {
  pub idx: ModuleIdx,
  pub id: ModuleId,
  /// `ModuleId` relative to `cwd`, used in output comments and messages.
  pub stable_id: String,
  /// Used to derive the name of the module's init function.
  pub repr_name: String,
  pub is_user_defined_entry: bool,
  pub exec_order: u32,
  pub import_records: IndexVec<ImportRecordIdx, ResolvedImportRecord>,
  pub ecma_view: EcmaView,
}

impl NormalModule {
  pub fn importee(&self, record: ImportRecordIdx) -> ModuleIdx {
    self.import_records[record].resolved_module()
  }
}

impl Deref for NormalModule {
  type Target = EcmaView;

  fn deref(&self) -> &Self::Target {
    &self.ecma_view
  }
}

impl DerefMut for NormalModule {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.ecma_view
  }
}
