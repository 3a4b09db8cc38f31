//! Config file and store path resolution

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the store location
pub const DATABASE_ENV: &str = "EMOJIKIT_DATABASE";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct EmojikitConfig {
    /// Store file location
    pub database: Option<String>,
    /// Bundled store copied into place on first run
    pub default_store: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("emojikit.toml")
}

/// Per-user store location, e.g. `~/.local/share/emojikit/emojis.db`
pub fn default_database_path() -> anyhow::Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "emojikit")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("emojis.db"))
}

/// Resolve the store path: explicit flag, then environment, then config,
/// then the per-user default.
pub fn resolve_database_path(
    explicit: Option<&Path>,
    config: Option<&EmojikitConfig>,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(DATABASE_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.and_then(|c| c.database.as_deref()) {
        return Ok(PathBuf::from(path));
    }
    default_database_path()
}

/// Default store to provision from: config value, else the bundled candidates
pub fn resolve_default_store(config: Option<&EmojikitConfig>) -> Option<PathBuf> {
    config
        .and_then(|c| c.default_store.as_deref())
        .map(PathBuf::from)
        .or_else(crate::storage::provision::find_default_store)
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<EmojikitConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: EmojikitConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &EmojikitConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
