use std::sync::Arc;

use esmpack_error::{BuildResult, TransformError};
use tracing::debug;

use crate::{
  HookLoadArgs, HookLoadOutput, HookRenderChunkArgs, HookResolveIdArgs, HookResolveIdOutput,
  HookTransformArgs, SharedPlugin,
};

pub type SharedPluginDriver = Arc<PluginDriver>;

/// Runs plugin hooks in the order the plugins were declared.
#[derive(Debug, Default)]
pub struct PluginDriver {
  plugins: Vec<SharedPlugin>,
}

impl PluginDriver {
  pub fn new_shared(plugins: Vec<SharedPlugin>) -> SharedPluginDriver {
    Arc::new(Self { plugins })
  }

  pub fn build_start(&self) -> BuildResult<()> {
    let errors = self
      .plugins
      .iter()
      .filter_map(|plugin| {
        plugin
          .build_start()
          .err()
          .map(|err| err.context(format!("[plugin {}] buildStart hook failed", plugin.name())))
      })
      .collect::<Vec<_>>();

    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors.into())
    }
  }

  pub fn resolve_id(
    &self,
    args: &HookResolveIdArgs<'_>,
  ) -> anyhow::Result<Option<HookResolveIdOutput>> {
    for plugin in &self.plugins {
      if let Some(resolved) = plugin.resolve_id(args).map_err(|err| {
        err.context(format!("[plugin {}] failed to resolve {:?}", plugin.name(), args.specifier))
      })? {
        debug!(plugin = %plugin.name(), specifier = args.specifier, id = %resolved.id, "resolved by plugin");
        return Ok(Some(resolved));
      }
    }
    Ok(None)
  }

  pub fn load(&self, args: &HookLoadArgs<'_>) -> anyhow::Result<Option<HookLoadOutput>> {
    for plugin in &self.plugins {
      if let Some(loaded) = plugin
        .load(args)
        .map_err(|err| err.context(format!("[plugin {}] failed to load {}", plugin.name(), args.id)))?
      {
        return Ok(Some(loaded));
      }
    }
    Ok(None)
  }

  /// Feeds `code` through every plugin's `transform` hook, in order.
  pub fn transform(&self, id: &str, mut code: String) -> Result<String, TransformError> {
    for plugin in &self.plugins {
      let output = plugin.transform(&HookTransformArgs { id, code: &code }).map_err(|err| {
        match err.downcast::<TransformError>() {
          Ok(mut transform_error) => {
            transform_error.plugin = plugin.name().into_owned();
            transform_error
          }
          Err(err) => TransformError {
            plugin: plugin.name().into_owned(),
            id: id.to_string(),
            message: format!("{err:#}"),
          },
        }
      })?;

      if let Some(output) = output {
        debug!(plugin = %plugin.name(), id, "transformed");
        code = output.code;
      }
    }
    Ok(code)
  }

  pub fn render_chunk(&self, filename: &str, format: &str, mut code: String) -> anyhow::Result<String> {
    for plugin in &self.plugins {
      let output = plugin.render_chunk(&HookRenderChunkArgs { filename, code: &code, format }).map_err(
        |err| err.context(format!("[plugin {}] renderChunk hook failed", plugin.name())),
      )?;
      if let Some(output) = output {
        code = output.code;
      }
    }
    Ok(code)
  }

  pub fn build_end(&self, error: Option<&str>) -> BuildResult<()> {
    let errors = self
      .plugins
      .iter()
      .filter_map(|plugin| {
        plugin
          .build_end(error)
          .err()
          .map(|err| err.context(format!("[plugin {}] buildEnd hook failed", plugin.name())))
      })
      .collect::<Vec<_>>();

    if errors.is_empty() {
      Ok(())
    } else {
      Err(errors.into())
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{
    borrow::Cow,
    sync::atomic::{AtomicUsize, Ordering},
  };

  use super::*;
  use crate::{HookTransformOutput, HookTransformReturn, Plugin};

  #[derive(Debug)]
  struct Append(&'static str);

  impl Plugin for Append {
    fn name(&self) -> Cow<'static, str> {
      Cow::Borrowed(self.0)
    }

    fn transform(&self, args: &HookTransformArgs<'_>) -> HookTransformReturn {
      Ok(Some(HookTransformOutput { code: format!("{}{}", args.code, self.0) }))
    }
  }

  #[derive(Debug)]
  struct Failing;

  impl Plugin for Failing {
    fn name(&self) -> Cow<'static, str> {
      Cow::Borrowed("failing")
    }

    fn transform(&self, _args: &HookTransformArgs<'_>) -> HookTransformReturn {
      Err(anyhow::anyhow!("unexpected token"))
    }
  }

  #[derive(Debug, Default)]
  struct Counting(AtomicUsize);

  impl Plugin for Counting {
    fn name(&self) -> Cow<'static, str> {
      Cow::Borrowed("counting")
    }

    fn transform(&self, _args: &HookTransformArgs<'_>) -> HookTransformReturn {
      self.0.fetch_add(1, Ordering::SeqCst);
      Ok(None)
    }
  }

  #[test]
  fn transform_applies_in_declared_order() {
    let driver = PluginDriver::new_shared(vec![Arc::new(Append("a")) as SharedPlugin, Arc::new(Append("b"))]);
    assert_eq!(driver.transform("/x.js", String::from(">")).unwrap(), ">ab");

    let driver = PluginDriver::new_shared(vec![Arc::new(Append("b")) as SharedPlugin, Arc::new(Append("a"))]);
    assert_eq!(driver.transform("/x.js", String::from(">")).unwrap(), ">ba");
  }

  #[test]
  fn transform_error_names_plugin_and_module() {
    let counting = Arc::new(Counting::default());
    let driver = PluginDriver::new_shared(vec![Arc::new(Failing) as SharedPlugin, Arc::clone(&counting) as SharedPlugin]);
    let err = driver.transform("/x.js", String::new()).unwrap_err();
    assert_eq!(err.plugin, "failing");
    assert_eq!(err.id, "/x.js");
    assert_eq!(err.message, "unexpected token");
    // Later plugins never see a module that failed.
    assert_eq!(counting.0.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn empty_driver_is_identity() {
    let driver = PluginDriver::new_shared(vec![]);
    assert_eq!(driver.transform("/x.js", String::from("a")).unwrap(), "a");
    assert!(driver.resolve_id(&HookResolveIdArgs { specifier: "a", importer: None, is_entry: true }).unwrap().is_none());
    assert_eq!(driver.render_chunk("out.js", "es", String::from("x")).unwrap(), "x");
  }
}
