//! Manifest merging and configuration for the material-tailwind generator
//!
//! This crate owns everything the generator decides on its own: the
//! dependency merge over package.json, the entry guard for generator options,
//! the optional material-tailwind.toml file and the formatting pass over
//! changed files.

pub mod format;
pub mod json;
pub mod loader;
pub mod merge;
pub mod options;
pub mod toml;

// Re-export main types
pub use format::{format_files, Formatter, JsonFormatter};
pub use json::{read_manifest, write_manifest, PackageJson};
pub use loader::{ConfigLoader, ConfigSource, LoadedConfig};
pub use merge::{merge, AdditionRequest, DependencyMerger, Manifest, MergeAction, MergeReport};
pub use options::{GeneratorOptions, ValidatedOptions};
pub use self::toml::{FormatSection, GeneratorConfig};

use mtw_core::error::MtwError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, MtwError>;
