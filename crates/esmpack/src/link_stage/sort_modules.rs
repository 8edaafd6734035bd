use std::iter;

use esmpack_common::{Module, ModuleIdx};
use rustc_hash::{FxHashMap, FxHashSet};

use super::LinkStage;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
enum Status {
  ToBeExecuted(ModuleIdx),
  WaitForExit(ModuleIdx),
}

impl LinkStage {
  /// Assigns `exec_order` by walking static imports depth first from the entry. Modules only
  /// reachable through `import()` are walked afterwards, in the order they were discovered.
  pub(crate) fn sort_modules(&mut self) {
    let mut execution_stack = vec![Status::ToBeExecuted(self.entry)];
    let mut dynamic_entries = Vec::new();

    let mut executed_ids = FxHashSet::default();
    let mut stack_indexes_of_executing_id = FxHashMap::default();

    let mut next_exec_order = 0;
    let mut circular_dependencies = FxHashSet::default();
    let mut sorted_modules = Vec::with_capacity(self.module_table.len());

    loop {
      let Some(status) = execution_stack.pop() else {
        // Start the next dynamically imported module that wasn't reached statically.
        let Some(next) = dynamic_entries.iter().copied().find(|id| !executed_ids.contains(id)) else {
          break;
        };
        execution_stack.push(Status::ToBeExecuted(next));
        continue;
      };

      match status {
        Status::ToBeExecuted(id) => {
          if executed_ids.contains(&id) {
            // Try to check if there is a circular dependency
            if let Some(index) = stack_indexes_of_executing_id.get(&id).copied() {
              // Executing
              let cycles = execution_stack[index..]
                .iter()
                .filter_map(|action| match action {
                  // Only modules with `Status::WaitForExit` are on the execution chain
                  Status::ToBeExecuted(_) => None,
                  Status::WaitForExit(id) => Some(*id),
                })
                .chain(iter::once(id))
                .collect::<Box<[_]>>();
              circular_dependencies.insert(cycles);
            }
          } else {
            executed_ids.insert(id);
            execution_stack.push(Status::WaitForExit(id));
            stack_indexes_of_executing_id.insert(id, execution_stack.len() - 1);

            if let Module::Normal(module) = &self.module_table[id] {
              execution_stack.extend(
                module
                  .import_records
                  .iter()
                  .filter(|rec| rec.kind.is_static())
                  .map(|rec| rec.resolved_module())
                  .rev()
                  .map(Status::ToBeExecuted),
              );
              dynamic_entries.extend(
                module
                  .import_records
                  .iter()
                  .filter(|rec| !rec.kind.is_static())
                  .map(|rec| rec.resolved_module()),
              );
            }
          }
        }
        Status::WaitForExit(id) => {
          match &mut self.module_table[id] {
            Module::Normal(module) => {
              sorted_modules.push(id);
              module.exec_order = next_exec_order;
            }
            Module::External(module) => {
              module.exec_order = next_exec_order;
            }
          }
          next_exec_order += 1;
          stack_indexes_of_executing_id.remove(&id);
        }
      }
    }

    let mut circular_dependencies = circular_dependencies.into_iter().collect::<Vec<_>>();
    circular_dependencies.sort();
    for cycle in circular_dependencies {
      let paths = cycle
        .iter()
        .copied()
        .filter_map(|id| self.module_table[id].as_normal())
        .map(|module| module.stable_id.as_str())
        .collect::<Vec<_>>();

      self.warnings.push(anyhow::anyhow!("Circular dependency: {}.", paths.join(" -> ")));
    }

    self.sorted_modules = sorted_modules;
  }
}
