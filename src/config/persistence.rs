use std::fs;
use std::path::PathBuf;

use super::StripConfig;

/// Returns the platform-specific base config directory.
///
/// Resolution order:
/// 1. `XDG_CONFIG_HOME`
/// 2. `$HOME/.config`
/// 3. `%USERPROFILE%/.config`
pub fn config_base_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg));
    }
    if let Some(home) = std::env::var_os("HOME") {
        return Some(PathBuf::from(home).join(".config"));
    }
    std::env::var_os("USERPROFILE").map(|home| PathBuf::from(home).join(".config"))
}

/// Returns the path to `~/.config/tabstrip/config.ron`.
fn config_path() -> Option<PathBuf> {
    config_base_dir().map(|base| base.join("tabstrip").join("config.ron"))
}

/// Loads the config from disk, falling back to defaults on any error.
pub fn load_config() -> StripConfig {
    let Some(path) = config_path() else {
        return StripConfig::default();
    };
    let Ok(contents) = fs::read_to_string(&path) else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return StripConfig::default();
    };
    match ron::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "invalid config, using defaults");
            StripConfig::default()
        }
    }
}

/// Persists the config to disk.
pub fn save_config(config: &StripConfig) -> Result<(), crate::StripError> {
    let path = config_path().ok_or(crate::StripError::NoConfigDir)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let pretty = ron::ser::PrettyConfig::default();
    let serialized = ron::ser::to_string_pretty(config, pretty)
        .map_err(|err| crate::StripError::Config(err.to_string()))?;
    fs::write(path, serialized)?;
    Ok(())
}
