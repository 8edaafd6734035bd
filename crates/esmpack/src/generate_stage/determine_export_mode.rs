use esmpack_common::{NormalModule, OutputExports};
use esmpack_error::BuildResult;

fn quoted_names(export_names: &[String]) -> String {
  export_names.iter().map(|k| format!(r#""{k}""#)).collect::<Vec<_>>().join(", ")
}

/// Decides how the entry's exports are exposed by `cjs` and `iife` output, after
/// https://github.com/rollup/rollup/blob/master/src/utils/getExportMode.ts
pub fn determine_export_mode(
  warnings: &mut Vec<anyhow::Error>,
  export_mode: OutputExports,
  module: &NormalModule,
  export_names: &[String],
  bundle_name: &str,
) -> BuildResult<OutputExports> {
  match export_mode {
    OutputExports::Named => Ok(OutputExports::Named),
    OutputExports::Default => {
      if export_names.len() != 1 || export_names[0].as_str() != "default" {
        Err(anyhow::anyhow!(
          r#""default" was specified for "output.exports", but entry module "{}" has the following exports: {}."#,
          module.stable_id,
          quoted_names(export_names)
        ))?;
      }
      Ok(OutputExports::Default)
    }
    OutputExports::None => {
      if !export_names.is_empty() {
        Err(anyhow::anyhow!(
          r#""none" was specified for "output.exports", but entry module "{}" has the following exports: {}."#,
          module.stable_id,
          quoted_names(export_names)
        ))?;
      }
      Ok(OutputExports::None)
    }
    OutputExports::Auto => {
      if export_names.is_empty() {
        Ok(OutputExports::None)
      } else if export_names.len() == 1 && export_names[0].as_str() == "default" {
        Ok(OutputExports::Default)
      } else {
        if export_names.iter().any(|name| name.as_str() == "default") {
          warnings.push(anyhow::anyhow!(
            r#"Entry module "{}" is using named (including {}) and default exports together. Consumers of your bundle will have to use `{}.default` to access the default export, which may not be what you want. Use `output.exports: "named"` to disable this warning."#,
            module.stable_id,
            quoted_names(export_names),
            bundle_name
          ));
        }
        Ok(OutputExports::Named)
      }
    }
  }
}
