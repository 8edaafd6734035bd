use esmpack_fs::OsFileSystem;
use esmpack_plugin::SharedPluginDriver;

use super::module_loader::ModuleLoaderMsg;
use crate::{
  types::{SharedOptions, SharedResolver},
  utils::resolve_id::ResolveIdContext,
};

/// Used to store common data shared between all tasks.
pub struct TaskContext {
  pub fs: OsFileSystem,
  pub options: SharedOptions,
  pub resolver: SharedResolver,
  pub plugin_driver: SharedPluginDriver,
  pub tx: tokio::sync::mpsc::Sender<ModuleLoaderMsg>,
}

impl TaskContext {
  pub fn resolve_id_context(&self) -> ResolveIdContext<'_> {
    ResolveIdContext {
      options: &self.options,
      resolver: &self.resolver,
      plugin_driver: &self.plugin_driver,
    }
  }
}
