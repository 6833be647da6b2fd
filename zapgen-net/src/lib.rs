// zapgen-net/src/lib.rs
pub mod api;

// Re-export the public fetching functions
pub use api::{api_token, fetch_cask_record};
