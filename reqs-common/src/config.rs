// reqs-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::UserDirs;
use tracing::debug;

use super::error::{ReqsError, Result};

const DEFAULT_ROOT_DIRNAME: &str = ".reqs";
const DEFAULT_CATALOG_URL: &str = "https://formulae.brew.sh/api/formula.json";
const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const CATALOG_CACHE_FILENAME: &str = "catalog.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub catalog_url: String,
    pub catalog_ttl: Duration,
    /// Process-scoped flag: log each identifier right before its action runs.
    pub verbose: bool,
    /// Shell template for the "ensure present" directive; `{name}` is substituted.
    pub ensure_command: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading reqs configuration");

        let root = match env::var("REQS_ROOT").ok().filter(|s| !s.is_empty()) {
            Some(root) => PathBuf::from(root),
            None => {
                let home = UserDirs::new()
                    .map(|ud| ud.home_dir().to_path_buf())
                    .ok_or_else(|| {
                        ReqsError::Config(
                            "REQS_ROOT is not set and no home directory could be found".to_string(),
                        )
                    })?;
                home.join(DEFAULT_ROOT_DIRNAME)
            }
        };
        debug!("Effective REQS_ROOT set to: {}", root.display());

        let catalog_url = env::var("REQS_CATALOG_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string());

        let catalog_ttl = match env::var("REQS_CATALOG_TTL").ok().filter(|s| !s.is_empty()) {
            Some(raw) => humantime::parse_duration(&raw).map_err(|e| {
                ReqsError::Config(format!("Invalid REQS_CATALOG_TTL '{raw}': {e}"))
            })?,
            None => DEFAULT_CATALOG_TTL,
        };

        let verbose = env::var("REQS_VERBOSE").is_ok_and(|v| parse_flag(&v));
        let ensure_command = env::var("REQS_ENSURE_CMD").ok().filter(|s| !s.is_empty());

        debug!("Configuration loaded successfully.");
        Ok(Self {
            root,
            catalog_url,
            catalog_ttl,
            verbose,
            ensure_command,
        })
    }

    /// Configuration rooted at `root` with every other setting at its default.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_ttl: DEFAULT_CATALOG_TTL,
            verbose: false,
            ensure_command: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn catalog_cache_path(&self) -> PathBuf {
        self.cache_dir().join(CATALOG_CACHE_FILENAME)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn load_config() -> Result<Config> {
    Config::load()
}
