pub mod output_exports;
pub mod platform;
