mod determine_export_mode;
mod formats;
mod render_chunk_to_assets;
mod render_module;
mod runtime;

use esmpack_common::{BuildDescriptor, Module, ModuleIdx, NormalModule, OutputExports};
use esmpack_plugin::COMMONJS_EXPORTS_ACCESSOR;
use esmpack_utils::{concat_string, ecmascript::legitimize_identifier_name};
use itertools::Itertools;
use oxc_index::IndexVec;
use rustc_hash::FxHashSet;

use crate::link_stage::{LinkStageOutput, ResolvedExports};

pub use self::render_chunk_to_assets::GenerateStage;

pub struct GenerateContext<'a> {
  pub options: &'a BuildDescriptor,
  pub link_output: &'a LinkStageOutput,
  pub entry: &'a NormalModule,
  /// `__esmpack_init_*` for internal modules, `__esmpack_external_*` for external ones.
  binding_names: IndexVec<ModuleIdx, String>,
  /// External modules in execution order.
  pub externals: Vec<ModuleIdx>,
}

impl<'a> GenerateContext<'a> {
  pub fn new(options: &'a BuildDescriptor, link_output: &'a LinkStageOutput) -> anyhow::Result<Self> {
    let entry = link_output.module_table[link_output.entry]
      .as_normal()
      .ok_or_else(|| anyhow::anyhow!("The entry module must not be external"))?;

    let externals = link_output
      .module_table
      .iter()
      .filter_map(Module::as_external)
      .sorted_by_key(|module| (module.exec_order, module.id.clone()))
      .map(|module| module.idx)
      .collect::<Vec<_>>();

    // Names only depend on the execution order, so they are stable across builds.
    let mut used_names = FxHashSet::default();
    let mut deconflict = |name: String| {
      let mut candidate = name.clone();
      let mut count = 0;
      while used_names.contains(&candidate) {
        count += 1;
        candidate = format!("{name}${count}");
      }
      used_names.insert(candidate.clone());
      candidate
    };

    let mut binding_names =
      link_output.module_table.iter().map(|_| String::new()).collect::<IndexVec<ModuleIdx, _>>();
    for &idx in &link_output.sorted_modules {
      if let Some(module) = link_output.module_table[idx].as_normal() {
        binding_names[idx] = deconflict(concat_string!("__esmpack_init_", module.repr_name));
      }
    }
    for &idx in &externals {
      let name = legitimize_identifier_name(link_output.module_table[idx].id());
      binding_names[idx] = deconflict(concat_string!("__esmpack_external_", name));
    }

    Ok(Self { options, link_output, entry, binding_names, externals })
  }

  pub fn binding_name(&self, idx: ModuleIdx) -> &str {
    &self.binding_names[idx]
  }

  pub fn is_external(&self, idx: ModuleIdx) -> bool {
    self.link_output.module_table[idx].is_external()
  }

  /// The expression evaluating to the exports of a module.
  pub fn importee_expr(&self, idx: ModuleIdx) -> String {
    if self.is_external(idx) {
      self.binding_name(idx).to_string()
    } else {
      concat_string!(self.binding_name(idx), "()")
    }
  }

  pub fn entry_exports(&self) -> &ResolvedExports {
    &self.link_output.resolved_exports[self.link_output.entry]
  }

  pub fn entry_init_call(&self) -> String {
    self.importee_expr(self.entry.idx)
  }

  /// The entry's `module.exports` when it is a converted CommonJS module and the export mode is
  /// left to the bundler. `cjs` and `iife` output expose it as is.
  pub fn entry_commonjs_exports(&self) -> Option<String> {
    let is_commonjs = self.entry.local_export_names().any(|name| name == COMMONJS_EXPORTS_ACCESSOR);
    (is_commonjs && self.options.exports == OutputExports::Auto)
      .then(|| concat_string!(self.entry_init_call(), ".", COMMONJS_EXPORTS_ACCESSOR, "()"))
  }

  pub fn renderable_modules(&self) -> impl Iterator<Item = &'a NormalModule> {
    let link_output = self.link_output;
    link_output.sorted_modules.iter().filter_map(move |idx| link_output.module_table[*idx].as_normal())
  }
}
