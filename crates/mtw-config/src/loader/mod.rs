//! Configuration discovery and the workspace root

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;
use crate::{ConfigResult, toml::GeneratorConfig};

/// Name of the generator configuration file
pub const CONFIG_FILE: &str = "material-tailwind.toml";

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// material-tailwind.toml at this path
    File(Utf8PathBuf),
    /// No file found, built-in defaults
    Defaults,
}

/// A loaded configuration and where it applies
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: GeneratorConfig,
    pub source: ConfigSource,
    /// Directory the generator treats as the workspace root
    pub workspace_root: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load the generator configuration, falling back to defaults
    pub async fn load(&self) -> ConfigResult<LoadedConfig> {
        match self.resolve_config_path(CONFIG_FILE) {
            Some(path) => {
                debug!("Loading configuration from {}", path);
                let config = crate::toml::load_from_file(&path).await?;
                let workspace_root = path
                    .parent()
                    .map(Utf8Path::to_path_buf)
                    .unwrap_or_else(|| self.cwd.clone());

                Ok(LoadedConfig {
                    config,
                    source: ConfigSource::File(path),
                    workspace_root,
                })
            }
            None => {
                debug!("No {} found, using defaults", CONFIG_FILE);
                Ok(LoadedConfig {
                    config: GeneratorConfig::default(),
                    source: ConfigSource::Defaults,
                    workspace_root: self.cwd.clone(),
                })
            }
        }
    }

    /// Find a file in the working directory or one of its parents
    pub fn resolve_config_path(&self, filename: &str) -> Option<Utf8PathBuf> {
        self.cwd
            .ancestors()
            .map(|dir| dir.join(filename))
            .find(|candidate| candidate.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_path(temp_dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_path(&temp_dir);

        let loaded = ConfigLoader::new(root.clone()).load().await.unwrap();

        assert_eq!(loaded.source, ConfigSource::Defaults);
        assert_eq!(loaded.workspace_root, root);
        assert_eq!(loaded.config, GeneratorConfig::default());
    }

    #[tokio::test]
    async fn test_config_found_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_path(&temp_dir);
        let nested = root.join("apps/web");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        tokio::fs::write(root.join(CONFIG_FILE), "[format]\nindent = 4\n").await.unwrap();

        let loaded = ConfigLoader::new(nested).load().await.unwrap();

        assert_eq!(loaded.source, ConfigSource::File(root.join(CONFIG_FILE)));
        assert_eq!(loaded.workspace_root, root);
        assert_eq!(loaded.config.format.indent, 4);
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_path(&temp_dir);
        tokio::fs::write(root.join(CONFIG_FILE), "manifest = \"/etc/package.json\"\n").await.unwrap();

        assert!(ConfigLoader::new(root).load().await.is_err());
    }
}
