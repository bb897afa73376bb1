//! Client and cache configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// BGPView API base URL
pub const BGPVIEW_URL: &str = "https://api.bgpview.io";

/// RIPEstat API base URL
pub const RIPESTAT_URL: &str = "https://stat.ripe.net";

/// bgp.tools base URL (serves `table.jsonl`)
pub const BGPTOOLS_URL: &str = "https://bgp.tools";

/// Timeout for the per-ASN lookup APIs
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the bulk table download
pub const BULK_TIMEOUT: Duration = Duration::from_secs(30);

/// Age after which the cached bulk table is refreshed (24 hours)
pub const CACHE_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Default location of the cached bulk table, relative to the working directory
pub const CACHE_FILE: &str = "bgp_tools_cache.jsonl";

/// bgp.tools rejects clients that do not look like a browser
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/100 Safari/537.36";

/// Base URLs of the three upstream sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// BGPView API
    pub bgpview: String,

    /// RIPEstat data API
    pub ripestat: String,

    /// bgp.tools
    pub bgptools: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            bgpview: BGPVIEW_URL.to_string(),
            ripestat: RIPESTAT_URL.to_string(),
            bgptools: BGPTOOLS_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every source at the same base URL (useful for testing)
    #[must_use]
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            bgpview: base.clone(),
            ripestat: base.clone(),
            bgptools: base,
        }
    }
}

/// HTTP behaviour of the source adapters
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upstream base URLs
    pub endpoints: Endpoints,

    /// Timeout applied to each lookup API request
    pub lookup_timeout: Duration,

    /// Timeout applied to the bulk table download
    pub bulk_timeout: Duration,

    /// User-Agent sent to the lookup APIs
    pub user_agent: String,

    /// User-Agent sent when downloading the bulk table
    pub bulk_user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            lookup_timeout: LOOKUP_TIMEOUT,
            bulk_timeout: BULK_TIMEOUT,
            user_agent: format!("asnprefix/{}", env!("CARGO_PKG_VERSION")),
            bulk_user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// Location and freshness window of the bulk table cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// File the bulk table is persisted to
    pub path: PathBuf,

    /// Age after which the file is considered stale
    pub max_age: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(CACHE_FILE),
            max_age: CACHE_MAX_AGE,
        }
    }
}

impl CacheConfig {
    /// Create a cache configuration for the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_age: CACHE_MAX_AGE,
        }
    }

    /// Set the freshness window
    #[must_use]
    pub const fn max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }
}
