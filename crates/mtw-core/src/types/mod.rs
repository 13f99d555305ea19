//! Core data types shared by the generator crates.
//!
//! - Dependency sections of a package manifest
//! - Package manager detection for the post-generation install task

pub mod dependency;
pub mod package_manager;

// Re-export all public types
pub use dependency::{Dependency, DependencyKind};
pub use package_manager::PackageManager;
