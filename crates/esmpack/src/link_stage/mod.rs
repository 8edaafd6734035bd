mod bind_imports_and_exports;
mod sort_modules;

use esmpack_common::ModuleIdx;
use esmpack_error::BuildResult;
use oxc_index::IndexVec;
use tracing::debug;

use crate::{scan_stage::ScanStageOutput, types::IndexModules};

/// Export names a module provides at runtime, including the ones reached through `export *`.
#[derive(Debug, Default, Clone)]
pub struct ResolvedExports {
  pub names: Vec<String>,
  /// External modules re-exported with `export *`, directly or through other modules. Their names
  /// are only known at runtime.
  pub external_stars: Vec<ModuleIdx>,
}

impl ResolvedExports {
  pub fn contains(&self, name: &str) -> bool {
    self.names.iter().any(|item| item == name)
  }
}

#[derive(Debug)]
pub struct LinkStageOutput {
  pub module_table: IndexModules,
  pub entry: ModuleIdx,
  /// Internal modules in execution order.
  pub sorted_modules: Vec<ModuleIdx>,
  pub resolved_exports: IndexVec<ModuleIdx, ResolvedExports>,
  pub warnings: Vec<anyhow::Error>,
}

pub struct LinkStage {
  module_table: IndexModules,
  entry: ModuleIdx,
  sorted_modules: Vec<ModuleIdx>,
  resolved_exports: IndexVec<ModuleIdx, ResolvedExports>,
  warnings: Vec<anyhow::Error>,
  errors: Vec<anyhow::Error>,
}

impl LinkStage {
  pub fn new(scan_stage_output: ScanStageOutput) -> Self {
    Self {
      module_table: scan_stage_output.module_table,
      entry: scan_stage_output.entry,
      sorted_modules: Vec::new(),
      resolved_exports: IndexVec::new(),
      warnings: scan_stage_output.warnings,
      errors: Vec::new(),
    }
  }

  pub fn link(mut self) -> BuildResult<LinkStageOutput> {
    self.sort_modules();
    self.bind_imports_and_exports();

    if !self.errors.is_empty() {
      Err(self.errors)?;
    }

    debug!(modules = self.sorted_modules.len(), "linked");
    Ok(LinkStageOutput {
      module_table: self.module_table,
      entry: self.entry,
      sorted_modules: self.sorted_modules,
      resolved_exports: self.resolved_exports,
      warnings: self.warnings,
    })
  }
}
