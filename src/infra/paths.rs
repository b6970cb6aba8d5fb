// src/infra/paths.rs — Config path resolution
//
// LUCIDRA_HOME, when set, holds the config file directly.
// Otherwise config lives under ~/.lucidra/.

use std::path::PathBuf;

/// Returns the LUCIDRA_HOME override, if set.
fn lucidra_home() -> Option<PathBuf> {
    std::env::var_os("LUCIDRA_HOME").map(PathBuf::from)
}

/// Home directory, if the platform can determine one.
pub fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Configuration directory: $LUCIDRA_HOME/ or ~/.lucidra/
pub fn config_dir() -> Option<PathBuf> {
    if let Some(home) = lucidra_home() {
        return Some(home);
    }
    dirs_home().map(|home| home.join(".lucidra"))
}

/// Config file path
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
