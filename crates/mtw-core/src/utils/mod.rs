//! Utility functions and helpers.
//!
//! Common functionality used across multiple generator crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{is_safe_path, normalize_path, tree_path};
