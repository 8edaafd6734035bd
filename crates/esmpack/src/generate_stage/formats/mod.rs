pub mod cjs;
pub mod esm;
pub mod iife;
