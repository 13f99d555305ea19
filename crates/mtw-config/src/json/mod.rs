//! package.json reading and writing through the workspace tree
//!
//! The document is kept as an ordered JSON object so that every key the
//! generator does not own survives a read/write cycle in its original
//! position. Only the `dependencies` and `devDependencies` sections are
//! rewritten, sorted by package name.

use camino::Utf8Path;
use mtw_core::error::MtwError;
use mtw_core::tree::Tree;
use mtw_core::types::DependencyKind;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;
use crate::{ConfigResult, merge::Manifest};

/// A parsed package.json document
#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    fields: Map<String, Value>,
}

impl PackageJson {
    /// Package name, if declared
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Raw access to a top-level field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Extract the dependency sections
    pub fn manifest(&self, path: &Utf8Path) -> ConfigResult<Manifest> {
        Ok(Manifest {
            dependencies: self.section(path, DependencyKind::Runtime)?,
            dev_dependencies: self.section(path, DependencyKind::Dev)?,
        })
    }

    /// Write the dependency sections back. Existing sections keep their
    /// position; an empty section is only written if it was already there.
    pub fn set_manifest(&mut self, manifest: &Manifest) {
        for kind in [DependencyKind::Runtime, DependencyKind::Dev] {
            let key = kind.manifest_key();
            let section = manifest.section(kind);

            if section.is_empty() && !self.fields.contains_key(key) {
                continue;
            }

            let object: Map<String, Value> = section
                .iter()
                .map(|(name, constraint)| (name.clone(), Value::String(constraint.clone())))
                .collect();
            self.fields.insert(key.to_string(), Value::Object(object));
        }
    }

    /// Serialize with two-space indentation and a trailing newline
    pub fn to_json_string(&self) -> ConfigResult<String> {
        let mut content = serde_json::to_string_pretty(&self.fields)
            .map_err(|e| MtwError::JsonParse {
                path: "package.json".to_string(),
                message: format!("JSON serialization error: {}", e),
            })?;
        content.push('\n');
        Ok(content)
    }

    fn section(&self, path: &Utf8Path, kind: DependencyKind) -> ConfigResult<BTreeMap<String, String>> {
        let key = kind.manifest_key();
        let Some(value) = self.fields.get(key) else {
            return Ok(BTreeMap::new());
        };

        let object = value.as_object().ok_or_else(|| MtwError::InvalidManifest {
            path: path.to_string(),
            reason: format!("'{}' must be an object", key),
        })?;

        object
            .iter()
            .map(|(name, constraint)| match constraint.as_str() {
                Some(constraint) => Ok((name.clone(), constraint.to_string())),
                None => Err(MtwError::InvalidManifest {
                    path: path.to_string(),
                    reason: format!("'{}.{}' must be a version string", key, name),
                }),
            })
            .collect()
    }
}

/// Parse package.json content
pub fn parse_package_json(path: &Utf8Path, content: &str) -> ConfigResult<PackageJson> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| MtwError::JsonParse {
            path: path.to_string(),
            message: format!("JSON parsing error: {}", e),
        })?;

    match value {
        Value::Object(fields) => Ok(PackageJson { fields }),
        _ => Err(MtwError::InvalidManifest {
            path: path.to_string(),
            reason: "top-level value must be an object".to_string(),
        }),
    }
}

/// Read the manifest at `path` through the tree
pub fn read_manifest(tree: &dyn Tree, path: &Utf8Path) -> ConfigResult<(PackageJson, Manifest)> {
    let content = tree.read_to_string(path)?
        .ok_or_else(|| MtwError::ManifestNotFound { path: path.to_string() })?;

    let document = parse_package_json(path, &content)?;
    let manifest = document.manifest(path)?;

    debug!(
        "Read {}: {} dependencies, {} devDependencies",
        path,
        manifest.dependencies.len(),
        manifest.dev_dependencies.len()
    );

    Ok((document, manifest))
}

/// Stage `manifest` into `document` and write it to `path`
pub fn write_manifest(
    tree: &mut dyn Tree,
    path: &Utf8Path,
    mut document: PackageJson,
    manifest: &Manifest,
) -> ConfigResult<()> {
    document.set_manifest(manifest);
    let content = document.to_json_string()?;
    tree.write(path, content.into_bytes())
}
