use std::sync::Arc;

use anyhow::Context;
use esmpack::SharedPlugin;
use esmpack_plugin_commonjs::{CommonJsOptions, CommonJsPlugin};

use crate::config::PluginConfig;

pub const BUILTIN_PLUGINS: &[&str] = &[esmpack_plugin_commonjs::PLUGIN_NAME];

/// Instantiates a plugin the CLI knows by name.
pub fn create_plugin(config: &PluginConfig) -> anyhow::Result<SharedPlugin> {
  match config.name() {
    esmpack_plugin_commonjs::PLUGIN_NAME => {
      let options = match config.options() {
        Some(options) => serde_json::from_value::<CommonJsOptions>(options.clone())
          .with_context(|| format!("Invalid options for plugin \"{}\"", config.name()))?,
        None => CommonJsOptions::default(),
      };
      Ok(Arc::new(CommonJsPlugin::new(options)))
    }
    name => anyhow::bail!("Unknown plugin \"{name}\", expected one of: {}", BUILTIN_PLUGINS.join(", ")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn creates_commonjs_plugin() {
    let plugin = create_plugin(&PluginConfig::Name("commonjs".to_string())).unwrap();
    assert_eq!(plugin.name(), "commonjs");

    let plugin = create_plugin(&PluginConfig::WithOptions {
      name: "commonjs".to_string(),
      options: serde_json::json!({ "extensions": [".cjs"] }),
    })
    .unwrap();
    assert_eq!(plugin.name(), "commonjs");
  }

  #[test]
  fn rejects_unknown_plugins_and_options() {
    let err = create_plugin(&PluginConfig::Name("babel".to_string())).unwrap_err();
    assert_eq!(err.to_string(), "Unknown plugin \"babel\", expected one of: commonjs");

    let err = create_plugin(&PluginConfig::WithOptions {
      name: "commonjs".to_string(),
      options: serde_json::json!({ "include": ["*.js"] }),
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "Invalid options for plugin \"commonjs\"");
  }
}
