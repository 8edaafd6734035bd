// An wrapper around the `oxc_resolver` crate to provide a more esmpack-specific API.

mod builtin_modules;
mod resolver;

pub use crate::{
  builtin_modules::is_node_builtin_module,
  resolver::{ResolveReturn, Resolver},
};

pub use oxc_resolver::ResolveError;
