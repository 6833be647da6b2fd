// zapgen-core/src/lib.rs

// Declare the top-level modules within the library crate
pub mod extract;
pub mod script;

// Re-export key types for easier use by the CLI crate
pub use extract::extract;
pub use script::{render, sanitize_name, script_filename};
