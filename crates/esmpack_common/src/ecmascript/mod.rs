pub mod ecma_view;
pub mod module_decl;
