use std::{borrow::Cow, fmt::Debug, sync::Arc};

use crate::types::{
  HookLoadArgs, HookLoadReturn, HookNoopReturn, HookRenderChunkArgs, HookRenderChunkReturn,
  HookResolveIdArgs, HookResolveIdReturn, HookTransformArgs, HookTransformReturn,
};

pub type SharedPlugin = Arc<dyn Plugin>;

/// The capability contract every transformation plugin implements.
///
/// All hooks are optional. `resolve_id` and `load` are "first" hooks: the first plugin returning
/// `Some` wins. `transform` and `render_chunk` are "sequential": every plugin sees the code produced
/// by the plugins before it, in the order they were listed.
pub trait Plugin: Debug + Send + Sync + 'static {
  fn name(&self) -> Cow<'static, str>;

  fn build_start(&self) -> HookNoopReturn {
    Ok(())
  }

  fn resolve_id(&self, _args: &HookResolveIdArgs<'_>) -> HookResolveIdReturn {
    Ok(None)
  }

  fn load(&self, _args: &HookLoadArgs<'_>) -> HookLoadReturn {
    Ok(None)
  }

  fn transform(&self, _args: &HookTransformArgs<'_>) -> HookTransformReturn {
    Ok(None)
  }

  fn render_chunk(&self, _args: &HookRenderChunkArgs<'_>) -> HookRenderChunkReturn {
    Ok(None)
  }

  /// `error` carries the rendered build errors when the build failed.
  fn build_end(&self, _error: Option<&str>) -> HookNoopReturn {
    Ok(())
  }
}
