use std::{collections::hash_map::Entry, sync::Arc};

use arcstr::ArcStr;
use esmpack_common::{
  ExternalModule, ImportRecordIdx, Module, ModuleId, ModuleIdx, NormalModule, RawImportRecord,
  ResolvedId,
};
use esmpack_error::BuildResult;
use esmpack_fs::OsFileSystem;
use esmpack_plugin::SharedPluginDriver;
use oxc_index::IndexVec;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc::Receiver;
use tracing::debug;

use super::{
  module_task::{ModuleTask, ModuleTaskOwner},
  task_context::TaskContext,
};
use crate::types::{IndexModules, SharedOptions, SharedResolver};

pub struct NormalModuleTaskResult {
  pub module: NormalModule,
  pub raw_import_records: IndexVec<ImportRecordIdx, RawImportRecord>,
  pub resolved_deps: IndexVec<ImportRecordIdx, ResolvedId>,
  pub warnings: Vec<anyhow::Error>,
}

pub enum ModuleLoaderMsg {
  NormalModuleDone(Box<NormalModuleTaskResult>),
  BuildErrors(Vec<anyhow::Error>),
}

pub struct ModuleLoader {
  rx: Receiver<ModuleLoaderMsg>,
  remaining: u32,
  shared_context: Arc<TaskContext>,
  modules: IndexVec<ModuleIdx, Option<Module>>,
  visited: FxHashMap<ArcStr, ModuleIdx>,
}

#[derive(Debug)]
pub struct ModuleLoaderOutput {
  pub module_table: IndexModules,
  pub entry: ModuleIdx,
  pub warnings: Vec<anyhow::Error>,
}

impl ModuleLoader {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    plugin_driver: SharedPluginDriver,
  ) -> Self {
    // 1024 should be enough for most cases
    // over 1024 pending tasks are insane
    let (tx, rx) = tokio::sync::mpsc::channel(1024);

    let shared_context = Arc::new(TaskContext { fs, options, resolver, plugin_driver, tx });

    Self { rx, remaining: 0, shared_context, modules: IndexVec::new(), visited: FxHashMap::default() }
  }

  pub async fn fetch_all_modules(mut self, entry: ResolvedId) -> BuildResult<ModuleLoaderOutput> {
    let entry = self.try_spawn_new_task(entry, None, true);

    let mut errors: Vec<anyhow::Error> = vec![];
    let mut warnings: Vec<anyhow::Error> = vec![];

    while self.remaining > 0 {
      let Some(msg) = self.rx.recv().await else {
        break;
      };

      match msg {
        ModuleLoaderMsg::NormalModuleDone(task_result) => {
          let NormalModuleTaskResult {
            mut module,
            raw_import_records,
            resolved_deps,
            warnings: task_result_warnings,
          } = *task_result;

          warnings.extend(task_result_warnings);

          module.import_records = raw_import_records
            .into_iter()
            .zip(resolved_deps)
            .map(|(raw_rec, info)| {
              let owner = ModuleTaskOwner::new(module.stable_id.clone());
              let id = self.try_spawn_new_task(info, Some(owner), false);
              raw_rec.into_resolved(id)
            })
            .collect();

          debug!(id = %module.stable_id, dependencies = module.import_records.len(), "module done");
          let idx = module.idx;
          self.modules[idx] = Some(module.into());
          self.remaining -= 1;
        }
        ModuleLoaderMsg::BuildErrors(e) => {
          errors.extend(e);
          self.remaining -= 1;
        }
      }
    }

    if !errors.is_empty() {
      Err(errors)?;
    }

    let module_table = self
      .modules
      .into_iter()
      .collect::<Option<IndexModules>>()
      .ok_or_else(|| anyhow::anyhow!("Module tasks didn't complete as expected"))?;

    Ok(ModuleLoaderOutput { module_table, entry, warnings })
  }

  fn try_spawn_new_task(
    &mut self,
    resolved_id: ResolvedId,
    owner: Option<ModuleTaskOwner>,
    is_user_defined_entry: bool,
  ) -> ModuleIdx {
    match self.visited.entry(ArcStr::clone(&resolved_id.id)) {
      Entry::Occupied(visited) => *visited.get(),
      Entry::Vacant(not_visited) => {
        let idx = self.modules.push(None);

        if resolved_id.is_external {
          self.modules[idx] = Some(ExternalModule::new(idx, ModuleId::new(resolved_id.id)).into());
        } else {
          self.remaining += 1;

          let task = ModuleTask::new(
            Arc::clone(&self.shared_context),
            idx,
            owner,
            resolved_id,
            is_user_defined_entry,
          );

          tokio::spawn(task.run());
        }

        *not_visited.insert(idx)
      }
    }
  }
}
