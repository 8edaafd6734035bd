pub mod bundle_output;

use std::sync::Arc;

use esmpack_common::{BuildDescriptor, Module, ModuleIdx};
use esmpack_resolver::Resolver;
use oxc_index::IndexVec;

pub type IndexModules = IndexVec<ModuleIdx, Module>;

pub type SharedResolver = Arc<Resolver>;
pub type SharedOptions = Arc<BuildDescriptor>;
