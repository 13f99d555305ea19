//! Generator options and their entry guard.
//!
//! Options start out unchecked. [`GeneratorOptions::validate`] is the only way
//! to obtain [`ValidatedOptions`], and the generator only accepts the latter,
//! so nothing can touch the tree before the guard has run.

use camino::{Utf8Path, Utf8PathBuf};
use mtw_core::error::MtwError;
use serde_json::Value;
use crate::ConfigResult;

/// Options as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Logical project name
    pub name: String,

    /// Project root relative to the workspace, required
    pub project_root: Option<String>,
}

/// Options that passed the entry guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    name: String,
    project_root: Utf8PathBuf,
}

impl GeneratorOptions {
    pub fn new(name: impl Into<String>, project_root: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_root: Some(project_root.into()),
        }
    }

    /// Read options from a JSON option bag (`{"name": ..., "projectRoot": ...}`).
    /// A `projectRoot` that is not a string counts as missing.
    pub fn from_json(value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let project_root = value
            .get("projectRoot")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self { name, project_root }
    }

    /// Run the entry guard
    pub fn validate(self) -> ConfigResult<ValidatedOptions> {
        match self.project_root {
            Some(project_root) if !project_root.is_empty() => Ok(ValidatedOptions {
                name: self.name,
                project_root: Utf8PathBuf::from(project_root),
            }),
            _ => Err(MtwError::required("projectRoot")),
        }
    }
}

impl ValidatedOptions {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_project_root() {
        let validated = GeneratorOptions::new("test", ".").validate().unwrap();
        assert_eq!(validated.name(), "test");
        assert_eq!(validated.project_root(), Utf8Path::new("."));
    }

    #[test]
    fn test_missing_or_empty_project_root() {
        let err = GeneratorOptions::new("test", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "projectRoot is required");

        let err = GeneratorOptions::default().validate().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_from_json_option_bag() {
        assert!(GeneratorOptions::from_json(&json!({ "projectRoot": "." })).validate().is_ok());
        assert!(GeneratorOptions::from_json(&json!({ "projectRoot": "" })).validate().is_err());
        assert!(GeneratorOptions::from_json(&json!({})).validate().is_err());
        assert!(GeneratorOptions::from_json(&json!({ "projectRoot": 42 })).validate().is_err());
        assert!(GeneratorOptions::from_json(&json!(null)).validate().is_err());

        let options = GeneratorOptions::from_json(&json!({ "name": "web", "projectRoot": "apps/web" }));
        assert_eq!(options, GeneratorOptions::new("web", "apps/web"));
    }
}
