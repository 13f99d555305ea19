//! Error message formatting with actionable suggestions.

use mtw_core::error::MtwError;
use super::colors::{ColorSupport, Style};
use std::error::Error;

/// Renders an error, its suggestion and its source chain
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    #[cfg(test)]
    fn plain() -> Self {
        Self {
            colors: ColorSupport::disabled(),
        }
    }

    /// Format an error with context and suggestions
    pub fn format_error(&self, error: &MtwError) -> String {
        let mut output = format!("{}: {}\n", self.colors.paint(Style::Red, "error"), error);

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("{}: {}\n", self.colors.paint(Style::Dim, "help"), suggestion));
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&format!("{}: {}\n", self.colors.paint(Style::Dim, "caused by"), err));
            source = err.source();
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_has_help() {
        let output = ErrorFormatter::plain().format_error(&MtwError::required("projectRoot"));
        assert!(output.starts_with("error: projectRoot is required\n"));
        assert!(output.contains("help: Pass the project location"));
    }

    #[test]
    fn test_source_chain() {
        let err = MtwError::io(
            "Failed to write package.json".to_string(),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only file system"),
        );
        let output = ErrorFormatter::plain().format_error(&err);
        assert!(output.contains("caused by: read-only file system"));
    }
}
