use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "travel_info.db";

/// Optional `travelseed.toml` settings; CLI flags take precedence
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TravelseedConfig {
    pub database: Option<String>,
    /// Path to a TOML seed set replacing the built-in sample data
    pub seed: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("travelseed.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<TravelseedConfig>> {
    let explicit = path.is_some();
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        if explicit {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: TravelseedConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Pick the database path: flag, then config, then `travel_info.db`
pub fn resolve_database(flag: Option<PathBuf>, config: Option<&TravelseedConfig>) -> PathBuf {
    flag.or_else(|| config.and_then(|c| c.database.as_ref()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}

/// Pick the seed file, if any: flag, then config
pub fn resolve_seed(flag: Option<PathBuf>, config: Option<&TravelseedConfig>) -> Option<PathBuf> {
    flag.or_else(|| config.and_then(|c| c.seed.as_ref()).map(PathBuf::from))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order() {
        let config = TravelseedConfig {
            database: Some("data/from_config.db".to_string()),
            seed: None,
        };

        assert_eq!(
            resolve_database(Some(PathBuf::from("flag.db")), Some(&config)),
            PathBuf::from("flag.db")
        );
        assert_eq!(
            resolve_database(None, Some(&config)),
            PathBuf::from("data/from_config.db")
        );
        assert_eq!(resolve_database(None, None), PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(resolve_seed(None, Some(&config)), None);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("travelseed.toml");
        std::fs::write(&path, "database = \"custom.db\"\nseed = \"seed.toml\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(config.database.as_deref(), Some("custom.db"));
        assert_eq!(config.seed.as_deref(), Some("seed.toml"));

        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("travel_info.db");
        ensure_db_dir(&db).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
