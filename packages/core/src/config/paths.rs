//! Settings file locations

use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable naming an explicit settings file
pub const CONFIG_ENV: &str = "IFACES_WIZARD_CONFIG";

const CONFIG_FILE_NAME: &str = "config.json";

/// Settings directory, e.g. `~/.config/ifaces-wizard` (root: `/root/.config/...`)
pub fn get_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ifaces-wizard").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default settings file path
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Settings file named by `IFACES_WIZARD_CONFIG`, if set and non-empty
pub fn env_config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
