mod bundler;
mod generate_stage;
mod link_stage;
mod scan_stage;
mod types;
mod utils;

pub use crate::{bundler::Bundler, types::bundle_output::BundleOutput};
pub use esmpack_common::*;
pub use esmpack_error::{BuildError, BuildResult};
pub use esmpack_plugin::{Plugin, PluginDriver};
