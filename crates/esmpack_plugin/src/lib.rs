mod plugin;
mod plugin_driver;
mod types;

pub use crate::{
  plugin::{Plugin, SharedPlugin},
  plugin_driver::{PluginDriver, SharedPluginDriver},
  types::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookNoopReturn, HookRenderChunkArgs,
    HookRenderChunkOutput, HookRenderChunkReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, HookTransformArgs, HookTransformOutput, HookTransformReturn,
  },
};

/// A converted CommonJS module exports a function under this name that returns its current
/// `module.exports`, and JSON modules export one returning their value. Requiring modules call
/// it instead of reading a snapshot, and the bundler keeps it out of `export *` and the entry's
/// exports.
pub const COMMONJS_EXPORTS_ACCESSOR: &str = "__cjs_exports";
