use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Application folder name under the platform config/data dirs
const APP_DIR: &str = "guestbook";

/// Files whose presence in the working directory makes it the config dir
const LOCAL_MARKERS: [&str; 2] = ["guestbook.json", "guestbook.log"];

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (GUESTBOOK_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| {
            std::env::var("GUESTBOOK_CONFIG_DIR")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
        });

        Self { config_dir }
    }
}

/// Get path to a configuration file (settings, window state)
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. GUESTBOOK_CONFIG_DIR environment variable
/// 3. Working directory IF guestbook.json or guestbook.log exist there
/// 4. Platform config directory from dirs-next (`~/.config/guestbook`, ...)
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir()).join(name)
}

/// Get path to a data file (logs)
///
/// Same priority as [`config_file`], falling back to the platform data
/// directory (`~/.local/share/guestbook`, ...).
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir()).join(name)
}

/// Ensure that configuration and data directories exist
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = resolve_dir(config, dirs_next::config_dir());
    let data_dir = resolve_dir(config, dirs_next::data_dir());

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;

    if data_dir != config_dir {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }

    Ok(())
}

fn has_local_markers(dir: &Path) -> bool {
    LOCAL_MARKERS.iter().any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, platform_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    if let Ok(current_dir) = std::env::current_dir()
        && has_local_markers(&current_dir)
    {
        return current_dir;
    }

    platform_dir
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };

        assert_eq!(config_file("guestbook.json", &config), PathBuf::from("/custom/guestbook.json"));
        assert_eq!(data_file("guestbook.log", &config), PathBuf::from("/custom/guestbook.log"));
    }

    #[test]
    fn test_cli_dir_beats_env() {
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/from-cli")));
        assert_eq!(config.config_dir, Some(PathBuf::from("/from-cli")));
    }

    #[test]
    fn test_platform_fallback_uses_app_dir() {
        let path = resolve_dir(&PathConfig::default(), Some(PathBuf::from("/platform")));
        // Either the cwd (when it carries marker files) or the platform dir
        if !has_local_markers(&std::env::current_dir().unwrap()) {
            assert_eq!(path, PathBuf::from("/platform/guestbook"));
        }
    }

    #[test]
    fn test_ensure_dirs_creates_custom_dir() {
        let dir = std::env::temp_dir().join(format!("guestbook_cfg_{}", std::process::id()));
        let config = PathConfig {
            config_dir: Some(dir.clone()),
        };
        ensure_dirs(&config).unwrap();
        assert!(dir.is_dir());
        let _ = std::fs::remove_dir_all(dir);
    }
}
