// reqs-core/src/catalog.rs
use std::collections::HashSet;

use once_cell::sync::OnceCell;
use reqs_common::cache::Cache;
use reqs_common::config::{Config, CATALOG_CACHE_FILENAME};
use reqs_common::error::{ReqsError, Result};
use reqs_common::Availability;
use serde::Deserialize;
use tracing::{debug, warn};

pub type Fetcher = Box<dyn Fn(&Config) -> Result<String> + Send + Sync>;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Name(String),
    Record { name: String },
}

impl CatalogEntry {
    fn into_name(self) -> String {
        match self {
            Self::Name(name) | Self::Record { name } => name,
        }
    }
}

/// Availability oracle backed by a cached remote catalog.
///
/// The name set is parsed once per instance. When the cache is missing or
/// empty the catalog is downloaded once; if that fails every lookup answers
/// `false`.
pub struct Catalog {
    config: Config,
    cache: Cache,
    fetcher: Fetcher,
    names: OnceCell<HashSet<String>>,
}

impl Catalog {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_fetcher(config, Box::new(reqs_net::fetch_catalog))
    }

    pub fn with_fetcher(config: &Config, fetcher: Fetcher) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            cache: Cache::new(config)?,
            fetcher,
            names: OnceCell::new(),
        })
    }

    pub fn names(&self) -> &HashSet<String> {
        self.names.get_or_init(|| match self.load() {
            Ok(names) => names,
            Err(e) => {
                warn!("Availability catalog unavailable, treating all names as absent: {}", e);
                HashSet::new()
            }
        })
    }

    /// Downloads the catalog, replaces the cached copy and drops the memoised
    /// name set. Returns the number of entries.
    pub fn refresh(&mut self) -> Result<usize> {
        let names = self.download()?;
        let count = names.len();
        self.names = OnceCell::from(names);
        Ok(count)
    }

    pub fn is_stale(&self) -> bool {
        !self.cache.is_cache_valid(CATALOG_CACHE_FILENAME).unwrap_or(false)
    }

    fn load(&self) -> Result<HashSet<String>> {
        match self.cache.load_raw(CATALOG_CACHE_FILENAME) {
            Ok(raw) if !raw.trim().is_empty() => match parse_catalog(&raw) {
                Ok(names) if !names.is_empty() => {
                    debug!("Loaded {} catalog entries from cache", names.len());
                    return Ok(names);
                }
                Ok(_) => debug!("Cached catalog is empty, refreshing"),
                Err(e) => warn!("Cached catalog is unreadable ({}), refreshing", e),
            },
            Ok(_) => debug!("Cached catalog is empty, refreshing"),
            Err(e) => debug!("Cache miss for catalog ({}), refreshing", e),
        }
        self.download()
    }

    fn download(&self) -> Result<HashSet<String>> {
        let raw = (self.fetcher)(&self.config)?;
        let names = parse_catalog(&raw)?;
        if let Err(cache_err) = self.cache.store_raw(CATALOG_CACHE_FILENAME, &raw) {
            warn!("Failed to cache catalog data after fetching: {}", cache_err);
        } else {
            debug!("Cached {} catalog entries", names.len());
        }
        Ok(names)
    }
}

impl Availability for Catalog {
    fn is_available(&self, name: &str) -> bool {
        self.names().contains(name)
    }
}

fn parse_catalog(raw: &str) -> Result<HashSet<String>> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(raw)
        .map_err(|e| ReqsError::Cache(format!("Failed to parse catalog data: {e}")))?;
    Ok(entries.into_iter().map(CatalogEntry::into_name).collect())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn counting_fetcher(body: &'static str, calls: &Arc<AtomicUsize>) -> Fetcher {
        let calls = Arc::clone(calls);
        Box::new(move |_: &Config| -> Result<String> {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(body.to_string())
        })
    }

    #[test]
    fn parses_names_and_records() {
        let names = parse_catalog(r#"["a", {"name": "b", "desc": "x"}]"#).unwrap();
        assert!(names.contains("a"));
        assert!(names.contains("b"));
        assert!(parse_catalog("{").is_err());
    }

    #[test]
    fn empty_cache_refreshes_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        let calls = Arc::new(AtomicUsize::new(0));
        let catalog =
            Catalog::with_fetcher(&config, counting_fetcher(r#"["magit"]"#, &calls)).unwrap();

        assert!(catalog.is_available("magit"));
        assert!(!catalog.is_available("nope"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(config.catalog_cache_path().exists());
    }

    #[test]
    fn populated_cache_avoids_network() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        Cache::new(&config)
            .unwrap()
            .store_raw(CATALOG_CACHE_FILENAME, r#"[{"name": "dash"}]"#)
            .unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let catalog = Catalog::with_fetcher(&config, counting_fetcher("[]", &calls)).unwrap();

        assert!(catalog.is_available("dash"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!catalog.is_stale());
    }

    #[test]
    fn failed_refresh_means_nothing_is_available() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        let catalog = Catalog::with_fetcher(
            &config,
            Box::new(|_: &Config| -> Result<String> {
                Err(ReqsError::Api("offline".to_string()))
            }),
        )
        .unwrap();
        assert!(!catalog.is_available("anything"));
    }

    #[test]
    fn explicit_refresh_replaces_memoised_names() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_root(dir.path());
        Cache::new(&config)
            .unwrap()
            .store_raw(CATALOG_CACHE_FILENAME, r#"["old"]"#)
            .unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let mut catalog =
            Catalog::with_fetcher(&config, counting_fetcher(r#"["new"]"#, &calls)).unwrap();

        assert!(catalog.is_available("old"));
        assert_eq!(catalog.refresh().unwrap(), 1);
        assert!(catalog.is_available("new"));
        assert!(!catalog.is_available("old"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
