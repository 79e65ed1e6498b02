//! Store configuration: where each record kind lives on disk.
//!
//! Both kind directories default to one shared platform data directory;
//! kinds coexist there, distinguished purely by extension. Precedence for
//! each directory: environment variable, config file, platform default.

use crate::error::ConfigError;
use crate::layout::LayoutStore;
use crate::logging::LoggingConfig;
use crate::server::ServerStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Flatstore configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding canned layout files; None means the platform default.
    #[serde(default)]
    pub layouts_dir: Option<PathBuf>,

    /// Directory holding server configuration files; None means the
    /// platform default (shared with layouts).
    #[serde(default)]
    pub servers_dir: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when
    /// no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| {
                    ConfigError::Read {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => Config::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Environment overrides win over the config file.
    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var("FLATSTORE_LAYOUTS_DIR") {
            if !dir.is_empty() {
                self.layouts_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(dir) = std::env::var("FLATSTORE_SERVERS_DIR") {
            if !dir.is_empty() {
                self.servers_dir = Some(PathBuf::from(dir));
            }
        }
    }

    /// Resolved directory for layout files.
    pub fn layouts_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.layouts_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_canned_dir(),
        }
    }

    /// Resolved directory for server configuration files.
    pub fn servers_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.servers_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_canned_dir(),
        }
    }

    /// Layout store over the resolved layouts directory.
    pub fn layout_store(&self) -> Result<LayoutStore, ConfigError> {
        Ok(LayoutStore::new(self.layouts_dir()?))
    }

    /// Server store over the resolved servers directory.
    pub fn server_store(&self) -> Result<ServerStore, ConfigError> {
        Ok(ServerStore::new(self.servers_dir()?))
    }
}

fn default_canned_dir() -> Result<PathBuf, ConfigError> {
    let project_dirs = directories::ProjectDirs::from("", "flatstore", "flatstore")
        .ok_or_else(|| {
            ConfigError::Invalid(
                "Could not determine platform data directory for record files".to_string(),
            )
        })?;
    Ok(project_dirs.data_dir().join("canned"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directories_share_the_canned_dir() {
        let config = Config::default();
        let layouts = config.layouts_dir().unwrap();
        let servers = config.servers_dir().unwrap();
        assert_eq!(layouts, servers);
        assert!(layouts.ends_with("canned"));
    }

    #[test]
    fn load_parses_toml_and_keeps_explicit_directories() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("flatstore.toml");
        std::fs::write(
            &path,
            r#"
layouts_dir = "/srv/flatstore/layouts"
servers_dir = "/srv/flatstore/servers"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(
            config.layouts_dir().unwrap(),
            PathBuf::from("/srv/flatstore/layouts")
        );
        assert_eq!(
            config.servers_dir().unwrap(),
            PathBuf::from("/srv/flatstore/servers")
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn load_fails_on_malformed_config_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("flatstore.toml");
        std::fs::write(&path, "layouts_dir = [not toml").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
