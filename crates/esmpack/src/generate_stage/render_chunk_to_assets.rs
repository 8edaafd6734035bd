use esmpack_common::{BuildDescriptor, OutputAsset, OutputFormat};
use esmpack_error::BuildResult;
use esmpack_plugin::PluginDriver;
use itertools::Itertools;
use tracing::debug;

use crate::{link_stage::LinkStageOutput, types::bundle_output::BundleOutput};

use super::{
  formats::{cjs::render_cjs, esm::render_esm, iife::render_iife},
  render_module::render_module,
  runtime::RuntimeHelpers,
  GenerateContext,
};

pub struct GenerateStage<'a> {
  link_output: &'a LinkStageOutput,
  options: &'a BuildDescriptor,
  plugin_driver: &'a PluginDriver,
}

impl<'a> GenerateStage<'a> {
  pub fn new(
    link_output: &'a LinkStageOutput,
    options: &'a BuildDescriptor,
    plugin_driver: &'a PluginDriver,
  ) -> Self {
    Self { link_output, options, plugin_driver }
  }

  #[tracing::instrument(level = "debug", skip_all)]
  pub fn generate(&self) -> BuildResult<BundleOutput> {
    let ctx = GenerateContext::new(self.options, self.link_output)?;
    let mut warnings = vec![];

    if !self.options.format.supports_external_imports() && !ctx.externals.is_empty() {
      let specifiers = ctx
        .externals
        .iter()
        .map(|&idx| format!("\"{}\"", self.link_output.module_table[idx].id()))
        .join(", ");
      Err(anyhow::anyhow!(
        "\"{}\" output cannot import external modules, but the bundle depends on {specifiers}",
        self.options.format
      ))?;
    }

    let mut helpers = RuntimeHelpers::default();
    let module_sources =
      ctx.renderable_modules().map(|module| render_module(&ctx, module, &mut helpers)).collect::<Vec<_>>();
    debug!(modules = module_sources.len(), externals = ctx.externals.len(), "rendered modules");

    let mut source_joiner = match self.options.format {
      OutputFormat::Esm => render_esm(&ctx, &module_sources, &helpers),
      OutputFormat::Cjs => render_cjs(&ctx, &module_sources, &mut helpers, &mut warnings)?,
      OutputFormat::Iife => render_iife(&ctx, &module_sources, &helpers, &mut warnings)?,
    };

    // A hashbang is only valid on the very first line.
    if let Some(hashbang) = ctx.entry.hashbang {
      source_joiner.prepend_source(&ctx.entry.source[hashbang.start as usize..hashbang.end as usize]);
    }
    if let Some(banner) = self.options.banner.as_deref() {
      source_joiner.prepend_source(banner);
    }
    if let Some(footer) = self.options.footer.as_deref() {
      source_joiner.append_source(footer);
    }

    let mut code = source_joiner.join();
    code.push('\n');

    let filename = self.options.output_filename();
    let content = self.plugin_driver.render_chunk(&filename, &self.options.format.to_string(), code)?;

    Ok(BundleOutput { assets: vec![OutputAsset { filename, content }], warnings })
  }
}
