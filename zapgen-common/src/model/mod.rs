// src/model/mod.rs
// Declares the modules within the model directory.
pub mod action;
pub mod record;

// Re-export
pub use action::RemovalAction;
pub use record::{string_list, CaskRecord, StringOrList};
