use std::sync::Arc;

use esmpack_common::{ImportRecordIdx, ModuleId, ModuleIdx, NormalModule, RawImportRecord, ResolvedId};
use esmpack_ecmascript::EcmaCompiler;
use esmpack_error::BuildResult;
use esmpack_utils::{ecmascript::legitimize_identifier_name, path_ext::PathExt};
use oxc_index::IndexVec;
use sugar_path::SugarPath;
use tracing::debug;

use super::{
  ast_scanner::{AstScanner, ScanResult},
  module_loader::{ModuleLoaderMsg, NormalModuleTaskResult},
  task_context::TaskContext,
};
use crate::utils::{load_source::load_source, resolve_id::resolve_id};

pub struct ModuleTaskOwner {
  importer_id: String,
}

impl ModuleTaskOwner {
  pub fn new(importer_id: String) -> Self {
    ModuleTaskOwner { importer_id }
  }
}

/// Loads, transforms and scans one internal module, then resolves its dependencies.
pub struct ModuleTask {
  ctx: Arc<TaskContext>,
  idx: ModuleIdx,
  owner: Option<ModuleTaskOwner>,
  resolved_id: ResolvedId,
  is_user_defined_entry: bool,
}

impl ModuleTask {
  pub fn new(
    ctx: Arc<TaskContext>,
    idx: ModuleIdx,
    owner: Option<ModuleTaskOwner>,
    resolved_id: ResolvedId,
    is_user_defined_entry: bool,
  ) -> Self {
    Self { ctx, idx, owner, resolved_id, is_user_defined_entry }
  }

  pub async fn run(self) {
    let msg = match self.run_inner() {
      Ok(result) => ModuleLoaderMsg::NormalModuleDone(Box::new(result)),
      Err(errs) => ModuleLoaderMsg::BuildErrors(errs.0),
    };
    // The loader only stops listening once it gave up on the build.
    let _ = self.ctx.tx.send(msg).await;
  }

  fn run_inner(&self) -> BuildResult<NormalModuleTaskResult> {
    let cwd = self.ctx.options.cwd.as_path();
    let id = ModuleId::new(self.resolved_id.id.as_str());
    let stable_id = id.stabilize(cwd);

    let source = load_source(&self.ctx.fs, &self.ctx.plugin_driver, &self.resolved_id).map_err(|err| {
      anyhow::anyhow!(
        "Could not load {}{}: {err}",
        self.resolved_id.debug_id(cwd),
        self
          .owner
          .as_ref()
          .map(|owner| format!(" (imported by {})", owner.importer_id))
          .unwrap_or_default(),
      )
    })?;

    let source = self.ctx.plugin_driver.transform(&self.resolved_id.id, source)?;
    debug!(id = %stable_id, "loaded");

    let ScanResult { ecma_view, import_records } = {
      let ast = EcmaCompiler::parse(source)
        .map_err(|err| anyhow::anyhow!("Failed to parse {stable_id}: {err}"))?;
      AstScanner::new(ast.source()).scan(ast.program())
    };

    let mut warnings = vec![];
    if ecma_view.uses_commonjs_globals {
      warnings.push(anyhow::anyhow!(
        "{stable_id} looks like a CommonJS module (it uses `require`, `module` or `exports`); add the commonjs plugin to convert it."
      ));
    }

    let resolved_deps = self.resolve_dependencies(&stable_id, &import_records, &mut warnings)?;

    let repr_name = self.resolved_id.id.as_path().representative_file_name();
    let repr_name = legitimize_identifier_name(&repr_name).into_owned();

    Ok(NormalModuleTaskResult {
      module: NormalModule {
        idx: self.idx,
        id,
        stable_id,
        repr_name,
        is_user_defined_entry: self.is_user_defined_entry,
        exec_order: u32::MAX,
        import_records: IndexVec::default(),
        ecma_view,
      },
      raw_import_records: import_records,
      resolved_deps,
      warnings,
    })
  }

  /// Resolves every import record, reporting all failures at once.
  fn resolve_dependencies(
    &self,
    stable_id: &str,
    import_records: &IndexVec<ImportRecordIdx, RawImportRecord>,
    warnings: &mut Vec<anyhow::Error>,
  ) -> BuildResult<IndexVec<ImportRecordIdx, ResolvedId>> {
    let ctx = self.ctx.resolve_id_context();
    let importer = Some((self.resolved_id.id.as_str(), stable_id));

    let mut errors = vec![];
    let mut resolved_deps = IndexVec::with_capacity(import_records.len());
    for record in import_records.iter() {
      match resolve_id(&ctx, &record.specifier, importer, warnings) {
        Ok(resolved) => {
          resolved_deps.push(resolved);
        }
        Err(err) => errors.push(err),
      }
    }

    if errors.is_empty() {
      Ok(resolved_deps)
    } else {
      Err(errors.into())
    }
  }
}
