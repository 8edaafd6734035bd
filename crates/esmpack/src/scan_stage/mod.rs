mod ast_scanner;
mod module_loader;
mod module_task;
mod task_context;

use std::sync::Arc;

use esmpack_error::{BuildResult, ResolutionError};
use esmpack_fs::OsFileSystem;
use esmpack_plugin::SharedPluginDriver;
use tracing::debug;

use self::module_loader::{ModuleLoader, ModuleLoaderOutput};
use crate::{
  types::{SharedOptions, SharedResolver},
  utils::resolve_id::{resolve_id, ResolveIdContext},
};

pub type ScanStageOutput = ModuleLoaderOutput;

pub struct ScanStage {
  fs: OsFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
  plugin_driver: SharedPluginDriver,
}

impl ScanStage {
  pub fn new(
    fs: OsFileSystem,
    options: SharedOptions,
    resolver: SharedResolver,
    plugin_driver: SharedPluginDriver,
  ) -> Self {
    Self { fs, options, resolver, plugin_driver }
  }

  pub async fn scan(&self) -> BuildResult<ScanStageOutput> {
    let mut warnings = vec![];
    let ctx = ResolveIdContext {
      options: &self.options,
      resolver: &self.resolver,
      plugin_driver: &self.plugin_driver,
    };
    let entry = resolve_id(&ctx, &self.options.input, None, &mut warnings)?;
    if entry.is_external {
      Err(ResolutionError {
        specifier: self.options.input.clone(),
        importer: None,
        reason: "the entry module cannot be external".to_string(),
      })?;
    }
    debug!(entry = %entry.debug_id(&self.options.cwd), "resolved entry");

    let module_loader = ModuleLoader::new(
      self.fs,
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.plugin_driver),
    );
    let mut output = module_loader.fetch_all_modules(entry).await?;
    warnings.append(&mut output.warnings);
    output.warnings = warnings;
    Ok(output)
  }
}
