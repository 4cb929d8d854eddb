//! Test utilities for the orgforge core library
//!
//! This crate provides mock backend implementations and test-data builders
//! for testing ledger, resolution and migration functionality without a real
//! directory or pipeline backend.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{RequestBuilder, seed_duplicate_sandbox_tree, seed_org};
pub use mocks::{MockDirectoryService, MockPipelineService, MoveCall};
