use esmpack_common::{ImportBinding, Module, ModuleDecl, ModuleIdx};
use esmpack_error::MissingExportError;
use esmpack_plugin::COMMONJS_EXPORTS_ACCESSOR;
use oxc_index::IndexVec;
use rustc_hash::FxHashSet;

use super::{LinkStage, ResolvedExports};
use crate::types::IndexModules;

impl LinkStage {
  pub(crate) fn bind_imports_and_exports(&mut self) {
    let mut memo = self.module_table.iter().map(|_| None).collect::<IndexVec<ModuleIdx, _>>();
    let mut visiting = FxHashSet::default();
    for idx in self.module_table.indices() {
      resolve_exports(&self.module_table, idx, &mut memo, &mut visiting);
    }
    self.resolved_exports = memo.into_iter().map(Option::unwrap_or_default).collect();

    self.check_imports();
  }

  /// Every named import from an internal module must name something the module exports.
  fn check_imports(&mut self) {
    for module in self.module_table.iter().filter_map(Module::as_normal) {
      for decl in &module.decls {
        let (record, names): (_, Vec<&str>) = match decl {
          ModuleDecl::Import { record, bindings, .. } => {
            (*record, bindings.iter().filter_map(ImportBinding::imported).collect())
          }
          ModuleDecl::ReExportNamed { record, specifiers, .. } => {
            (*record, specifiers.iter().map(|(imported, _)| imported.as_str()).collect())
          }
          _ => continue,
        };

        let importee_idx = module.importee(record);
        let Module::Normal(importee) = &self.module_table[importee_idx] else { continue };
        let exports = &self.resolved_exports[importee_idx];
        // Names coming from an external `export *` are only known at runtime.
        if !exports.external_stars.is_empty() {
          continue;
        }

        for name in names.into_iter().filter(|name| !exports.contains(name)) {
          self.errors.push(
            MissingExportError {
              importer: module.stable_id.clone(),
              importee: importee.stable_id.clone(),
              name: name.to_string(),
            }
            .into(),
          );
        }
      }
    }
  }
}

fn resolve_exports(
  module_table: &IndexModules,
  idx: ModuleIdx,
  memo: &mut IndexVec<ModuleIdx, Option<ResolvedExports>>,
  visiting: &mut FxHashSet<ModuleIdx>,
) -> ResolvedExports {
  if let Some(resolved) = &memo[idx] {
    return resolved.clone();
  }
  let Module::Normal(module) = &module_table[idx] else {
    return ResolvedExports::default();
  };

  // The CommonJS accessor is an implementation detail of converted modules, not an export.
  let mut names = module
    .local_export_names()
    .filter(|name| *name != COMMONJS_EXPORTS_ACCESSOR)
    .map(ToString::to_string)
    .collect::<Vec<_>>();
  if !visiting.insert(idx) {
    // Part of an `export *` cycle, the outer call collects the rest.
    return ResolvedExports { names, external_stars: vec![] };
  }

  let mut seen = names.iter().cloned().collect::<FxHashSet<_>>();
  let mut external_stars = vec![];
  for record in module.star_export_records() {
    let importee = module.importee(record);
    if module_table[importee].is_external() {
      if !external_stars.contains(&importee) {
        external_stars.push(importee);
      }
      continue;
    }

    let star = resolve_exports(module_table, importee, memo, visiting);
    for name in star.names {
      // `export *` never re-exports `default`, and local names shadow star names.
      if name != "default" && seen.insert(name.clone()) {
        names.push(name);
      }
    }
    for external in star.external_stars {
      if !external_stars.contains(&external) {
        external_stars.push(external);
      }
    }
  }
  visiting.remove(&idx);

  let resolved = ResolvedExports { names, external_stars };
  memo[idx] = Some(resolved.clone());
  resolved
}
