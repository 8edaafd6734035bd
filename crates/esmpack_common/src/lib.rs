mod bundler_options;
mod ecmascript;
mod module;
mod types;

pub use bundler_options::{
  build_descriptor::BuildDescriptor, output_exports::OutputExports, output_format::OutputFormat,
  platform::Platform, BuildOptions,
};

pub use crate::{
  ecmascript::{
    ecma_view::EcmaView,
    module_decl::{ImportBinding, ImportReference, ImportReferenceKind, ModuleDecl},
  },
  module::{external_module::ExternalModule, normal_module::NormalModule, Module},
  types::{
    import_kind::ImportKind,
    import_record::{ImportRecord, RawImportRecord, ResolvedImportRecord},
    module_id::ModuleId,
    output_asset::OutputAsset,
    raw_idx::{ImportRecordIdx, ModuleIdx},
    resolved_id::ResolvedId,
    source::Source,
    source_joiner::SourceJoiner,
  },
};

pub use esmpack_plugin::SharedPlugin;
