//! Locations of `.purlrc` configuration files.

use std::path::{Path, PathBuf};

/// File name of both the user and the project config.
pub const RC_FILE_NAME: &str = ".purlrc";

/// Environment variable naming a single config file to use instead of the
/// standard layers.
pub const RC_ENV_VAR: &str = "PURLRC";

/// Walk up from `cwd` and return the first `.purlrc` found.
///
/// The user's own `~/.purlrc` is skipped so it is never loaded twice.
pub fn find_project_config(cwd: &Path) -> Option<PathBuf> {
    let user = user_config_path();
    cwd.ancestors()
        .map(|dir| dir.join(RC_FILE_NAME))
        .find(|candidate| candidate.is_file() && Some(candidate) != user.as_ref())
}

/// Get the path to the user's config file (`~/.purlrc`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(RC_FILE_NAME))
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(path), |h| h.join(rest)),
        None if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
