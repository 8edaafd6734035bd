use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: &[&str] = &["esmpack", "esmpack_plugin_commonjs"];

fn directives(level: &str) -> String {
  CRATES.iter().map(|krate| format!("{krate}={level}")).collect::<Vec<_>>().join(",")
}

/// Sends `tracing` events to stderr. `RUST_LOG` wins over the verbosity flags.
pub fn init_logger(verbose: bool, silent: bool) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    let level = if verbose {
      "debug"
    } else if silent {
      "error"
    } else {
      "info"
    };
    EnvFilter::new(directives(level))
  });

  let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

  // Only fails when a subscriber is already installed.
  let _ = tracing_subscriber::registry().with(filter).with(fmt_layer).try_init();
}

#[test]
fn directives_cover_every_crate() {
  assert_eq!(directives("debug"), "esmpack=debug,esmpack_plugin_commonjs=debug");
}
