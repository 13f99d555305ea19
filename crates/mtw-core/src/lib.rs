//! # mtw-core
//!
//! Core types and utilities shared across the material-tailwind generator crates.
//!
//! This crate provides:
//! - `MtwError` enum for unified error handling
//! - Dependency section and package manager types
//! - The `Tree` abstraction over the workspace file system
//! - Path utilities that keep tree paths inside the workspace
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `error`: Error types and result aliases
//! - `types`: Core data types (DependencyKind, PackageManager, etc.)
//! - `tree`: Staged workspace file tree (disk-backed and in-memory)
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod tree;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{MtwError, MtwResult};
pub use tree::{ChangeKind, FileChange, FsTree, MemoryTree, Tree};
pub use types::{Dependency, DependencyKind, PackageManager};
