mod args;
mod config;
mod logger;
mod options;
mod plugins;
mod types;

use std::{path::Path, process::ExitCode, time::Instant};

use ansi_term::Colour;
use clap::Parser;
use esmpack::{BuildResult, BundleOutput, Bundler, OutputAsset};

use crate::{
  args::{InputArgs, LogArgs, OutputArgs},
  options::resolve_build_options,
};

#[derive(Parser)]
#[command(name = "esmpack", version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  log: LogArgs,
}

fn print_output_assets(dir: &Path, outputs: &[OutputAsset]) {
  let left = outputs.iter().map(|output| output.filename.len()).max().unwrap_or_default();
  let assets = outputs
    .iter()
    .map(|output| (output.filename.as_str(), format!("{:.2}", output.size_in_kib())))
    .collect::<Vec<_>>();
  let right = assets.iter().map(|(_, size)| size.len()).max().unwrap_or_default();

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;
  let dir = format!("{}/", dir.display());

  for (filename, size) in assets {
    println!(
      "{}{}{:left$} {}{:right$}{} kB",
      dim.paint(dir.as_str()),
      color.paint(filename),
      "",
      dim.paint("│ size: "),
      "",
      size,
      left = left - filename.len(),
      right = right - size.len()
    );
  }
}

async fn run(input: InputArgs, output: OutputArgs) -> BuildResult<(Bundler, BundleOutput)> {
  let options = resolve_build_options(input, output)?;
  let bundler = Bundler::new(options)?;
  let output = bundler.write().await?;
  Ok((bundler, output))
}

#[tokio::main]
async fn main() -> ExitCode {
  let args = Commands::parse();
  logger::init_logger(args.log.verbose, args.log.silent);

  let start = Instant::now();
  match run(args.input, args.output).await {
    Ok((bundler, output)) => {
      if !args.log.silent {
        let output_path = bundler.descriptor().output_path();
        let dir = output_path.parent().unwrap_or(Path::new("."));
        print_output_assets(dir, &output.assets);

        let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
        println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
      }
      ExitCode::SUCCESS
    }
    Err(errors) => {
      for error in errors.iter() {
        eprintln!("{} {error:#}", Colour::Red.paint("Error:"));
      }
      ExitCode::FAILURE
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const KNEX: &str = "const Client = require('./lib/client');\nmodule.exports = function knex(config) { return new Client(config); };\n";
  const CLIENT: &str = "module.exports = function Client(config) { this.config = config; };\n";
  const CONFIG: &str = r#"{ "input": "./knex.js", "output": { "file": "knex-es.js", "format": "es" }, "plugins": ["commonjs"] }"#;

  fn knex_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("lib")).unwrap();
    std::fs::write(dir.path().join("knex.js"), KNEX).unwrap();
    std::fs::write(dir.path().join("lib/client.js"), CLIENT).unwrap();
    std::fs::write(dir.path().join(config::DEFAULT_CONFIG_FILE), CONFIG).unwrap();
    dir
  }

  #[test]
  fn parses_flags() {
    let args = Commands::try_parse_from([
      "esmpack", "-i", "./knex.js", "-o", "knex-es.js", "--format", "es", "--plugin", "commonjs",
      "--external", "pg", "--external", "mysql", "--verbose",
    ])
    .unwrap();
    assert_eq!(args.input.input.as_deref(), Some("./knex.js"));
    assert_eq!(args.output.file.as_deref(), Some("knex-es.js"));
    assert_eq!(args.input.external, ["pg", "mysql"]);
    assert_eq!(args.input.plugin, ["commonjs"]);
    assert!(args.log.verbose);
    assert!(Commands::try_parse_from(["esmpack", "--verbose", "--silent"]).is_err());
  }

  #[tokio::test]
  async fn builds_from_config_file() {
    let dir = knex_project();
    let (_, output) =
      run(InputArgs { cwd: Some(dir.path().to_path_buf()), ..Default::default() }, OutputArgs::default())
        .await
        .unwrap();

    let written = std::fs::read_to_string(dir.path().join("knex-es.js")).unwrap();
    assert_eq!(written, output.assets[0].content);
    assert!(written.contains("export default __esmpack_entry.default;"));
    assert!(!written.contains("require("));
  }

  #[tokio::test]
  async fn missing_entry_fails_without_output() {
    let dir = knex_project();
    let result = run(
      InputArgs {
        cwd: Some(dir.path().to_path_buf()),
        input: Some("./does-not-exist.js".to_string()),
        ..Default::default()
      },
      OutputArgs::default(),
    )
    .await;
    let Err(err) = result else { panic!("the build should fail") };

    assert!(err.contains::<esmpack_error::ResolutionError>());
    assert!(!dir.path().join("knex-es.js").exists());
  }
}
