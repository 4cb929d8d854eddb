//! Test-data builders

pub mod test_data;

pub use test_data::{RequestBuilder, seed_duplicate_sandbox_tree, seed_org};
