//! Error types and result aliases for generator operations.
//!
//! Provides a unified error type that covers every failure the generator, its
//! configuration layer and the workspace tree can surface, with actionable
//! error messages.

use thiserror::Error;

/// Unified error type for all generator operations
#[derive(Error, Debug)]
pub enum MtwError {
    // Option errors
    #[error("{field} is required")]
    Validation { field: String },

    // Config errors
    #[error("Failed to parse material-tailwind.toml: {message} at line {line}, column {column}")]
    TomlParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Manifest errors
    #[error("Failed to parse {path}: {message}")]
    JsonParse { path: String, message: String },

    #[error("Cannot find {path} in the workspace")]
    ManifestNotFound { path: String },

    #[error("Invalid manifest {path}: {reason}")]
    InvalidManifest { path: String, reason: String },

    // Tree errors
    #[error("Path '{path}' escapes the workspace root")]
    PathOutsideWorkspace { path: String },

    #[error("Failed to format {path}: {message}")]
    Format { path: String, message: String },

    // Install errors
    #[error("`{command}` exited with status {status}")]
    InstallFailed { command: String, status: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for generator operations
pub type MtwResult<T> = Result<T, MtwError>;

impl MtwError {
    /// Create a validation error for a missing required option
    pub fn required(field: impl Into<String>) -> Self {
        Self::Validation { field: field.into() }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Check if this error was raised before anything was touched
    pub fn is_validation(&self) -> bool {
        matches!(self, MtwError::Validation { .. })
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            MtwError::Validation { .. } => {
                Some("Pass the project location with --project-root <path>, e.g. --project-root .")
            },
            MtwError::ManifestNotFound { .. } => {
                Some("Run the generator from the workspace root or set `manifest` in material-tailwind.toml")
            },
            MtwError::TomlParse { .. } | MtwError::ConfigValidation { .. } => {
                Some("Fix material-tailwind.toml or delete it to use the built-in defaults")
            },
            MtwError::PathOutsideWorkspace { .. } => {
                Some("Use a path relative to the workspace root")
            },
            MtwError::InstallFailed { .. } => {
                Some("The manifest was updated; re-run the install with your package manager")
            },
            _ => None,
        }
    }
}
