use crate::{ModuleId, ModuleIdx};

/// A module left out of the bundle and imported at runtime, e.g. `fs` or a user defined external.
#[derive(Debug)]
pub struct ExternalModule {
  pub idx: ModuleIdx,
  /// The specifier written in the output.
  pub id: ModuleId,
  pub exec_order: u32,
}

impl ExternalModule {
  pub fn new(idx: ModuleIdx, id: ModuleId) -> Self {
    Self { idx, id, exec_order: u32::MAX }
  }
}
