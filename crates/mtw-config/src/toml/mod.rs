//! material-tailwind.toml parsing and validation

use std::collections::BTreeMap;
use std::ops::Range;
use camino::Utf8Path;
use serde::Deserialize;
use mtw_core::error::MtwError;
use mtw_core::utils::path::is_safe_path;
use crate::{ConfigResult, merge::AdditionRequest};

/// Complete material-tailwind.toml configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    /// Workspace-relative manifest path
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Runtime dependencies to record
    #[serde(default = "default_dependencies")]
    pub dependencies: BTreeMap<String, String>,

    /// Development dependencies to record
    #[serde(default = "default_dev_dependencies", rename = "dev-dependencies")]
    pub dev_dependencies: BTreeMap<String, String>,

    /// Formatting pass over changed files
    #[serde(default)]
    pub format: FormatSection,
}

/// `[format]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormatSection {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn default_dependencies() -> BTreeMap<String, String> {
    AdditionRequest::material_tailwind().dependencies
}

fn default_dev_dependencies() -> BTreeMap<String, String> {
    AdditionRequest::material_tailwind().dev_dependencies
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    2
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            manifest: default_manifest(),
            dependencies: default_dependencies(),
            dev_dependencies: default_dev_dependencies(),
            format: FormatSection::default(),
        }
    }
}

impl Default for FormatSection {
    fn default() -> Self {
        Self {
            enabled: true,
            indent: default_indent(),
        }
    }
}

impl GeneratorConfig {
    /// The addition request this configuration describes
    pub fn additions(&self) -> AdditionRequest {
        AdditionRequest {
            dependencies: self.dependencies.clone(),
            dev_dependencies: self.dev_dependencies.clone(),
        }
    }

    pub fn manifest_path(&self) -> &Utf8Path {
        Utf8Path::new(&self.manifest)
    }
}

/// Parse TOML string to GeneratorConfig
pub fn parse_config(content: &str) -> ConfigResult<GeneratorConfig> {
    // Syntax first, for precise locations
    content.parse::<toml_edit::DocumentMut>()
        .map_err(|e| toml_error(content, "TOML syntax error", e.message(), e.span()))?;

    let config: GeneratorConfig = toml::from_str(content)
        .map_err(|e| toml_error(content, "TOML parsing error", e.message(), e.span()))?;

    validate_config(&config)?;

    Ok(config)
}

/// Validate configuration completeness
pub fn validate_config(config: &GeneratorConfig) -> ConfigResult<()> {
    let manifest = Utf8Path::new(&config.manifest);
    if config.manifest.is_empty() || !is_safe_path(manifest) {
        return Err(MtwError::ConfigValidation {
            field: "manifest".to_string(),
            reason: format!("'{}' must be a path inside the workspace", config.manifest),
        });
    }

    for (section, entries) in [
        ("dependencies", &config.dependencies),
        ("dev-dependencies", &config.dev_dependencies),
    ] {
        for (name, constraint) in entries {
            if !is_valid_package_name(name) {
                return Err(MtwError::ConfigValidation {
                    field: format!("{}.{}", section, name),
                    reason: "not a valid npm package name".to_string(),
                });
            }
            if constraint.trim().is_empty() {
                return Err(MtwError::ConfigValidation {
                    field: format!("{}.{}", section, name),
                    reason: "version constraint must not be empty".to_string(),
                });
            }
        }
    }

    if !(1..=8).contains(&config.format.indent) {
        return Err(MtwError::ConfigValidation {
            field: "format.indent".to_string(),
            reason: format!("{} is outside 1..=8", config.format.indent),
        });
    }

    Ok(())
}

/// Load and parse material-tailwind.toml from file path
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<GeneratorConfig> {
    let content = tokio::fs::read_to_string(path).await
        .map_err(|e| MtwError::io(format!("Failed to read {}", path), e))?;

    parse_config(&content)
        .map_err(|e| match e {
            MtwError::ConfigValidation { field, reason } => MtwError::ConfigValidation {
                field,
                reason: format!("{} (in {})", reason, path),
            },
            other => other,
        })
}

fn toml_error(content: &str, context: &str, message: &str, span: Option<Range<usize>>) -> MtwError {
    let (line, column) = span
        .map(|span| line_column(content, span.start))
        .unwrap_or((0, 0));

    MtwError::TomlParse {
        message: format!("{}: {}", context, message),
        line,
        column,
    }
}

/// 1-based line and column of a byte offset
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}

/// npm package name, optionally scoped (`@scope/name`)
fn is_valid_package_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 214 {
        return false;
    }

    let valid_part = |part: &str| {
        !part.is_empty()
            && !part.starts_with('.')
            && !part.starts_with('_')
            && part.chars().all(|c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_' | '~')
            })
    };

    match name.strip_prefix('@') {
        Some(scoped) => match scoped.split_once('/') {
            Some((scope, package)) => valid_part(scope) && valid_part(package),
            None => false,
        },
        None => valid_part(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.additions(), AdditionRequest::material_tailwind());
        assert_eq!(config.manifest_path(), Utf8Path::new("package.json"));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
manifest = "apps/web/package.json"

[dependencies]
"@angular/material" = "^17.0.0"

[dev-dependencies]
tailwindcss = "^3.4.0"

[format]
indent = 4
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.manifest, "apps/web/package.json");
        assert_eq!(config.dependencies.get("@angular/material").unwrap(), "^17.0.0");
        assert_eq!(config.dev_dependencies.len(), 1);
        assert!(config.format.enabled);
        assert_eq!(config.format.indent, 4);
    }

    #[test]
    fn test_syntax_error_location() {
        let err = parse_config("manifest = \"package.json\"\n[format\n").unwrap_err();
        match err {
            MtwError::TomlParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_type_error() {
        assert!(matches!(
            parse_config("[format]\nindent = \"wide\"\n"),
            Err(MtwError::TomlParse { .. })
        ));
    }

    #[test]
    fn test_invalid_values() {
        assert!(parse_config("manifest = \"../package.json\"").is_err());
        assert!(parse_config("[dependencies]\n\"Bad Name\" = \"1.0.0\"").is_err());
        assert!(parse_config("[dev-dependencies]\npostcss = \"  \"").is_err());
        assert!(parse_config("[format]\nindent = 0").is_err());
    }

    #[test]
    fn test_valid_package_names() {
        assert!(is_valid_package_name("tailwindcss"));
        assert!(is_valid_package_name("@angular/material"));
        assert!(is_valid_package_name("lodash.merge"));
        assert!(!is_valid_package_name("@angular"));
        assert!(!is_valid_package_name("_private"));
        assert!(!is_valid_package_name("Upper"));
        assert!(!is_valid_package_name(""));
    }

    #[test]
    fn test_line_column() {
        assert_eq!(line_column("abc", 0), (1, 1));
        assert_eq!(line_column("a\nbc", 3), (2, 2));
    }
}
