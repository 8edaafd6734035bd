pub type HookNoopReturn = anyhow::Result<()>;
pub type HookResolveIdReturn = anyhow::Result<Option<HookResolveIdOutput>>;
pub type HookLoadReturn = anyhow::Result<Option<HookLoadOutput>>;
pub type HookTransformReturn = anyhow::Result<Option<HookTransformOutput>>;
pub type HookRenderChunkReturn = anyhow::Result<Option<HookRenderChunkOutput>>;

#[derive(Debug, Clone, Copy)]
pub struct HookResolveIdArgs<'a> {
  pub specifier: &'a str,
  /// `None` when resolving the entry module.
  pub importer: Option<&'a str>,
  pub is_entry: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookResolveIdOutput {
  pub id: String,
  pub external: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct HookLoadArgs<'a> {
  pub id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookLoadOutput {
  pub code: String,
}

#[derive(Debug, Clone, Copy)]
pub struct HookTransformArgs<'a> {
  pub id: &'a str,
  pub code: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookTransformOutput {
  pub code: String,
}

#[derive(Debug, Clone, Copy)]
pub struct HookRenderChunkArgs<'a> {
  pub filename: &'a str,
  pub code: &'a str,
  /// `es`, `cjs` or `iife`.
  pub format: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRenderChunkOutput {
  pub code: String,
}
