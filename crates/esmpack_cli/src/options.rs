use std::path::Path;

use esmpack::{BuildOptions, BuildResult, OutputFormat};

use crate::{
  args::{InputArgs, OutputArgs},
  config::{ConfigFile, PluginConfig, DEFAULT_CONFIG_FILE},
  plugins::create_plugin,
};

/// Merges the config file and the command line flags. Flags win.
pub fn resolve_build_options(input: InputArgs, output: OutputArgs) -> BuildResult<BuildOptions> {
  let config_path = input.config.clone().or_else(|| {
    let default_path = input.cwd.clone().unwrap_or_default().join(DEFAULT_CONFIG_FILE);
    default_path.is_file().then_some(default_path)
  });
  let config = config_path.as_deref().map(ConfigFile::load).transpose()?.unwrap_or_default();

  // Paths in a config file are relative to the file itself.
  let config_dir = config_path
    .as_deref()
    .and_then(Path::parent)
    .filter(|dir| !dir.as_os_str().is_empty())
    .map(Path::to_path_buf);
  let cwd = input.cwd.or_else(|| match (config.cwd, config_dir) {
    (Some(cwd), Some(dir)) => Some(dir.join(cwd)),
    (cwd, dir) => cwd.or(dir),
  });

  let format =
    output.format.or(config.output.format).map(|format| format.parse::<OutputFormat>()).transpose()?;

  let plugins = if input.plugin.is_empty() {
    config.plugins
  } else {
    input.plugin.into_iter().map(PluginConfig::Name).collect()
  };
  let plugins = plugins.iter().map(create_plugin).collect::<anyhow::Result<Vec<_>>>()?;

  let external = if input.external.is_empty() { config.external } else { input.external };

  Ok(BuildOptions {
    input: input.input.or(config.input),
    cwd,
    platform: input.platform.map(Into::into).or(config.platform),
    external: Some(external),
    file: output.file.or(config.output.file),
    format,
    name: output.name.or(config.output.name),
    exports: output.exports.map(Into::into).or(config.output.exports),
    banner: output.banner.or(config.output.banner),
    footer: output.footer.or(config.output.footer),
    plugins,
  })
}
