//! Layered `.purlrc` configuration.
//!
//! Two layers are consulted, highest priority first:
//!
//! 1. **Project** - the nearest `.purlrc` walking up from the working directory
//! 2. **User** - `~/.purlrc`
//!
//! A single file named by `PURLRC` (or passed explicitly) replaces both.

use crate::error::{Error, Result};
use crate::parser::{parse_bool, parse_rc};
use crate::paths::{expand_tilde, find_project_config, user_config_path, RC_ENV_VAR};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key naming the type `purl build` uses when none is given.
pub const KEY_DEFAULT_TYPE: &str = "default-type";
/// Key enabling registry page links next to results.
pub const KEY_REGISTRY_LINKS: &str = "registry-links";
/// Key holding the default tracing filter.
pub const KEY_LOG: &str = "log";

/// Parsed configuration data from a single `.purlrc` file.
#[derive(Debug, Clone, Default)]
pub struct ConfigData {
    /// Path to the source file.
    pub source: PathBuf,
    /// Raw key-value pairs.
    pub data: HashMap<String, String>,
}

impl ConfigData {
    /// Load configuration from a file path.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let data = parse_rc(&content, path)?;
        tracing::debug!(path = %path.display(), keys = data.len(), "loaded config layer");

        Ok(Some(ConfigData {
            source: path.to_path_buf(),
            data,
        }))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(|s| s.as_str())
    }
}

/// Options for loading configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Override the working directory used to find the project config.
    pub cwd: Option<PathBuf>,
    /// Override the user config path (default: `~/.purlrc`).
    pub user_config: Option<PathBuf>,
    /// Load only this file. Takes precedence over `PURLRC`.
    pub config_file: Option<PathBuf>,
    /// Skip the project-level `.purlrc`.
    pub skip_project: bool,
    /// Skip the user-level `~/.purlrc`.
    pub skip_user: bool,
}

/// purl-kit configuration loaded from `.purlrc` files.
///
/// # Examples
///
/// ```no_run
/// use purl_kit::PurlConfig;
///
/// let config = PurlConfig::load().unwrap();
/// let ty = config.default_type().unwrap_or("npm");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PurlConfig {
    user_config: Option<ConfigData>,
    project_config: Option<ConfigData>,
}

impl PurlConfig {
    /// Load configuration from the standard locations.
    pub fn load() -> Result<Self> {
        Self::load_with_options(LoadOptions::default())
    }

    /// Load only the given file, bypassing layer discovery.
    ///
    /// Returns `Err(Error::FileNotFound)` if the file doesn't exist.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config = ConfigData::load(path)?.ok_or_else(|| Error::FileNotFound(path.to_path_buf()))?;
        Ok(PurlConfig {
            user_config: None,
            project_config: Some(config),
        })
    }

    /// Load configuration with custom options.
    pub fn load_with_options(opts: LoadOptions) -> Result<Self> {
        let explicit = opts.config_file.or_else(|| {
            std::env::var(RC_ENV_VAR)
                .ok()
                .filter(|v| !v.is_empty())
                .map(|v| expand_tilde(&v))
        });
        if let Some(path) = explicit {
            return Self::load_from_file(&path);
        }

        let user_config = if opts.skip_user {
            None
        } else {
            match opts.user_config.or_else(user_config_path) {
                Some(path) => ConfigData::load(&path)?,
                None => None,
            }
        };

        let project_config = if opts.skip_project {
            None
        } else {
            let cwd = opts
                .cwd
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
            match find_project_config(&cwd) {
                Some(path) => ConfigData::load(&path)?,
                None => None,
            }
        };

        Ok(PurlConfig {
            user_config,
            project_config,
        })
    }

    /// Get a raw config value by key, project layer first.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.project_config
            .as_ref()
            .and_then(|c| c.get(key))
            .or_else(|| self.user_config.as_ref().and_then(|c| c.get(key)))
    }

    /// Files that contributed to this configuration, lowest priority first.
    pub fn sources(&self) -> Vec<&Path> {
        [&self.user_config, &self.project_config]
            .into_iter()
            .flatten()
            .map(|c| c.source.as_path())
            .collect()
    }

    /// Type used by the manual builder when none is supplied.
    pub fn default_type(&self) -> Option<&str> {
        self.get(KEY_DEFAULT_TYPE).filter(|v| !v.is_empty())
    }

    /// Whether to print registry page URLs next to results. Defaults to
    /// `false`; unparseable values are treated as unset.
    pub fn registry_links(&self) -> bool {
        self.get(KEY_REGISTRY_LINKS)
            .and_then(parse_bool)
            .unwrap_or(false)
    }

    /// Default tracing filter directive, e.g. `debug` or `purl_kit=trace`.
    pub fn log_filter(&self) -> Option<&str> {
        self.get(KEY_LOG).filter(|v| !v.is_empty())
    }
}
