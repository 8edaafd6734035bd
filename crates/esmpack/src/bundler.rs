use std::sync::Arc;

use esmpack_common::{BuildDescriptor, BuildOptions};
use esmpack_error::BuildResult;
use esmpack_fs::{FileSystem, OsFileSystem};
use esmpack_plugin::{PluginDriver, SharedPluginDriver};
use esmpack_resolver::Resolver;
use tracing::{info, warn};

use crate::{
  generate_stage::GenerateStage,
  link_stage::LinkStage,
  scan_stage::ScanStage,
  types::{bundle_output::BundleOutput, SharedOptions, SharedResolver},
  utils::normalize_options::normalize_options,
};

pub struct Bundler {
  fs: OsFileSystem,
  options: SharedOptions,
  resolver: SharedResolver,
  plugin_driver: SharedPluginDriver,
}

impl Bundler {
  pub fn new(options: BuildOptions) -> BuildResult<Self> {
    let options = normalize_options(options)?;
    let resolver: SharedResolver = Resolver::new(options.platform, options.cwd.clone()).into();
    let plugin_driver = PluginDriver::new_shared(options.plugins.clone());

    Ok(Self { fs: OsFileSystem, options: Arc::new(options), resolver, plugin_driver })
  }

  pub fn descriptor(&self) -> &BuildDescriptor {
    &self.options
  }

  /// Bundles the entry module without touching the output file.
  pub async fn build(&self) -> BuildResult<BundleOutput> {
    self.plugin_driver.build_start()?;

    let result = self.bundle().await;
    let error = result.as_ref().err().map(ToString::to_string);
    let output = match (result, self.plugin_driver.build_end(error.as_deref())) {
      (Ok(output), Ok(())) => output,
      (Err(err), Ok(())) | (Ok(_), Err(err)) => return Err(err),
      (Err(mut err), Err(mut build_end_err)) => {
        err.append(&mut build_end_err);
        return Err(err);
      }
    };

    for warning in &output.warnings {
      warn!("{warning:#}");
    }
    info!(
      input = %self.options.input,
      format = %self.options.format,
      warnings = output.warnings.len(),
      "bundle generated"
    );
    Ok(output)
  }

  /// Bundles the entry module and writes the result to `file`.
  pub async fn write(&self) -> BuildResult<BundleOutput> {
    let output = self.build().await?;

    let path = self.options.output_path();
    if let Some(parent) = path.parent() {
      self.fs.create_dir_all(parent).map_err(|err| {
        anyhow::anyhow!("Failed to create output directory {}: {err}", parent.display())
      })?;
    }
    for asset in &output.assets {
      self
        .fs
        .write(&path, asset.content_as_bytes())
        .map_err(|err| anyhow::anyhow!("Failed to write {}: {err}", path.display()))?;
    }
    info!(path = %path.display(), "bundle written");

    Ok(output)
  }

  async fn bundle(&self) -> BuildResult<BundleOutput> {
    let scan_stage_output = ScanStage::new(
      self.fs,
      Arc::clone(&self.options),
      Arc::clone(&self.resolver),
      Arc::clone(&self.plugin_driver),
    )
    .scan()
    .await?;

    let link_stage_output = LinkStage::new(scan_stage_output).link()?;

    let mut output =
      GenerateStage::new(&link_stage_output, &self.options, &self.plugin_driver).generate()?;

    let mut warnings = link_stage_output.warnings;
    warnings.append(&mut output.warnings);
    output.warnings = warnings;
    Ok(output)
  }
}
