use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SortOrder;
use crate::loader::{DEFAULT_FETCH_TIMEOUT, DataSource};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub data: Option<DataConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path or http(s) URL of the dataset.
    pub source: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    /// Initial sort order for a new session.
    pub sort: Option<SortOrder>,
}

/// Platform config directory path: `<config_dir>/paperdeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("paperdeck").join("config.toml"))
}

/// Load config by cascading CWD `.paperdeck.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".paperdeck.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        data: Some(DataConfig {
            source: overlay
                .data
                .as_ref()
                .and_then(|d| d.source.clone())
                .or_else(|| base.data.as_ref().and_then(|d| d.source.clone())),
            fetch_timeout_secs: overlay
                .data
                .as_ref()
                .and_then(|d| d.fetch_timeout_secs)
                .or_else(|| base.data.as_ref().and_then(|d| d.fetch_timeout_secs)),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
            sort: overlay
                .display
                .as_ref()
                .and_then(|d| d.sort)
                .or_else(|| base.display.as_ref().and_then(|d| d.sort)),
        }),
    }
}

impl ConfigFile {
    /// Resolve the dataset location: explicit flag > `PAPERDECK_SOURCE` >
    /// config file > [`crate::DEFAULT_SOURCE`].
    pub fn resolve_source(&self, flag: Option<&str>) -> DataSource {
        let from_env = std::env::var("PAPERDECK_SOURCE").ok();
        let from_file = self.data.as_ref().and_then(|d| d.source.clone());
        resolve_source_with(flag, from_env.as_deref(), from_file.as_deref())
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.data
            .as_ref()
            .and_then(|d| d.fetch_timeout_secs)
            .map(|s| Duration::from_secs(s.max(1)))
            .unwrap_or(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn sort(&self) -> SortOrder {
        self.display
            .as_ref()
            .and_then(|d| d.sort)
            .unwrap_or_default()
    }

    pub fn theme(&self) -> Option<&str> {
        self.display
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .filter(|t| !t.is_empty())
    }
}

fn resolve_source_with(
    flag: Option<&str>,
    env: Option<&str>,
    file: Option<&str>,
) -> DataSource {
    let chosen = [flag, env, file]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(crate::DEFAULT_SOURCE);
    DataSource::parse(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_toml() {
        let config = ConfigFile {
            data: Some(DataConfig {
                source: Some("https://example.org/papers.json".to_string()),
                fetch_timeout_secs: Some(5),
            }),
            display: Some(DisplayConfig {
                theme: Some("modern".to_string()),
                sort: Some(SortOrder::Oldest),
            }),
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.sort(), SortOrder::Oldest);
        assert_eq!(parsed.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(parsed.theme(), Some("modern"));
    }

    #[test]
    fn sort_is_written_lowercase() {
        let parsed: ConfigFile = toml::from_str("[display]\nsort = \"oldest\"\n").unwrap();
        assert_eq!(parsed.sort(), SortOrder::Oldest);
        assert!(toml::from_str::<ConfigFile>("[display]\nsort = \"sideways\"\n").is_err());
    }

    #[test]
    fn defaults_when_absent() {
        let config = ConfigFile::default();
        assert_eq!(config.sort(), SortOrder::Newest);
        assert_eq!(config.fetch_timeout(), DEFAULT_FETCH_TIMEOUT);
        assert_eq!(config.theme(), None);
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            data: Some(DataConfig {
                source: Some("/base/papers.json".to_string()),
                fetch_timeout_secs: Some(30),
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            data: Some(DataConfig {
                source: Some("/overlay/papers.json".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay);
        let data = merged.data.unwrap();
        assert_eq!(data.source.unwrap(), "/overlay/papers.json");
        assert_eq!(data.fetch_timeout_secs, Some(30));
    }

    #[test]
    fn source_precedence() {
        assert_eq!(
            resolve_source_with(Some("flag.json"), Some("env.json"), Some("file.json")),
            DataSource::parse("flag.json")
        );
        assert_eq!(
            resolve_source_with(None, Some("env.json"), Some("file.json")),
            DataSource::parse("env.json")
        );
        assert_eq!(
            resolve_source_with(None, Some("  "), Some("file.json")),
            DataSource::parse("file.json")
        );
        assert_eq!(
            resolve_source_with(None, None, None),
            DataSource::parse(crate::DEFAULT_SOURCE)
        );
    }

    #[test]
    fn load_from_path_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[data]\nsource = \"papers.json\"\n").unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.data.unwrap().source.as_deref(), Some("papers.json"));

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("missing.toml")).is_none());
    }
}
