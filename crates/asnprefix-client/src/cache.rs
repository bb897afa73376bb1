//! Time-bounded local cache of the bgp.tools bulk table.
//!
//! The bulk table is tens of megabytes and changes slowly, so it is kept on
//! disk and only re-downloaded once the stored copy is older than the
//! configured maximum age. When a refresh fails, whatever copy exists is
//! served even if stale, and with no copy at all the table is simply empty.

use crate::config::CacheConfig;
use async_trait::async_trait;
use asnprefix_core::{PrefixError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Persistent storage for the bulk table blob
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Modification time of the stored blob, `None` if nothing is stored
    async fn modified(&self) -> Option<DateTime<Utc>>;

    /// Read the stored blob
    async fn load(&self) -> Result<String>;

    /// Replace the stored blob
    async fn save(&self, body: &str) -> Result<()>;
}

/// Network download of the full bulk table
#[async_trait]
pub trait TableFetcher: Send + Sync {
    /// Download the table body
    async fn fetch_table(&self) -> Result<String>;
}

/// How the lines of a [`TableSnapshot`] were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOrigin {
    /// Stored copy within the freshness window, no network call
    Cached,
    /// Freshly downloaded
    Downloaded,
    /// Refresh failed, an outdated stored copy was used
    Stale,
    /// Refresh failed and nothing was stored
    Unavailable,
}

impl std::fmt::Display for SnapshotOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cached => write!(f, "cached"),
            Self::Downloaded => write!(f, "downloaded"),
            Self::Stale => write!(f, "stale"),
            Self::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Lines of the bulk table as returned by one cache access
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    lines: Arc<[String]>,
    origin: SnapshotOrigin,
}

impl TableSnapshot {
    fn new(lines: Arc<[String]>, origin: SnapshotOrigin) -> Self {
        Self { lines, origin }
    }

    fn unavailable() -> Self {
        Self::new(Arc::from(Vec::new()), SnapshotOrigin::Unavailable)
    }

    /// Raw table lines
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// How the lines were obtained
    #[must_use]
    pub const fn origin(&self) -> SnapshotOrigin {
        self.origin
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if there are no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

struct Memo {
    lines: Arc<[String]>,
    taken_at: DateTime<Utc>,
}

/// Bulk table cache with freshness and fallback semantics.
///
/// All accesses go through one async mutex, so two concurrent callers never
/// refresh the stored copy at the same time. Loaded lines are kept in memory
/// and reused while they are still fresh.
pub struct BulkTableCache {
    fetcher: Arc<dyn TableFetcher>,
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    max_age: Duration,
    memo: Mutex<Option<Memo>>,
}

impl std::fmt::Debug for BulkTableCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkTableCache")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

impl BulkTableCache {
    /// Create a cache with the default freshness window and the system clock
    pub fn new(fetcher: impl TableFetcher + 'static, store: impl CacheStore + 'static) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            store: Arc::new(store),
            clock: Arc::new(SystemClock),
            max_age: crate::config::CACHE_MAX_AGE,
            memo: Mutex::new(None),
        }
    }

    /// Create a file-backed cache from configuration
    pub fn from_config(fetcher: impl TableFetcher + 'static, config: &CacheConfig) -> Self {
        Self::new(fetcher, FileStore::new(&config.path)).with_max_age(config.max_age)
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set the age after which the stored copy is refreshed
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    fn is_fresh(&self, taken_at: DateTime<Utc>) -> bool {
        let max_age = TimeDelta::from_std(self.max_age).unwrap_or(TimeDelta::MAX);
        self.clock.now().signed_duration_since(taken_at) < max_age
    }

    /// Current lines of the bulk table.
    ///
    /// Never fails: a failed refresh falls back to the stored copy, and
    /// without one the snapshot is empty with origin
    /// [`SnapshotOrigin::Unavailable`].
    pub async fn snapshot(&self) -> TableSnapshot {
        let mut memo = self.memo.lock().await;

        if let Some(m) = memo.as_ref().filter(|m| self.is_fresh(m.taken_at)) {
            return TableSnapshot::new(Arc::clone(&m.lines), SnapshotOrigin::Cached);
        }

        let modified = self.store.modified().await;

        if let Some(at) = modified.filter(|at| self.is_fresh(*at)) {
            match self.store.load().await {
                Ok(body) => {
                    debug!(modified = %at, "serving bulk table from cache");
                    return remember(&mut memo, &body, at, SnapshotOrigin::Cached);
                }
                Err(e) => warn!(error = %e, "error reading cached bulk table"),
            }
        }

        info!("downloading fresh bulk table (this may take a moment)");
        match self.fetcher.fetch_table().await {
            Ok(body) => {
                if let Err(e) = self.store.save(&body).await {
                    warn!(error = %e, "failed to persist bulk table");
                }
                remember(&mut memo, &body, self.clock.now(), SnapshotOrigin::Downloaded)
            }
            Err(e) => {
                warn!(error = %e, "error fetching bulk table");
                let Some(at) = modified else {
                    return TableSnapshot::unavailable();
                };
                match self.store.load().await {
                    Ok(body) => {
                        info!(modified = %at, "falling back to stale bulk table");
                        remember(&mut memo, &body, at, SnapshotOrigin::Stale)
                    }
                    Err(e) => {
                        warn!(error = %e, "error reading fallback bulk table");
                        TableSnapshot::unavailable()
                    }
                }
            }
        }
    }
}

fn remember(
    memo: &mut Option<Memo>,
    body: &str,
    taken_at: DateTime<Utc>,
    origin: SnapshotOrigin,
) -> TableSnapshot {
    let lines: Arc<[String]> = body.lines().map(str::to_owned).collect();
    *memo = Some(Memo {
        lines: Arc::clone(&lines),
        taken_at,
    });
    TableSnapshot::new(lines, origin)
}

/// Stores the bulk table in a single file; its mtime is the freshness signal
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store the blob at `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the blob
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn modified(&self) -> Option<DateTime<Utc>> {
        let meta = tokio::fs::metadata(&self.path).await.ok()?;
        meta.modified().ok().map(DateTime::<Utc>::from)
    }

    async fn load(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PrefixError::Cache(format!("failed to read {}: {e}", self.path.display())))
    }

    async fn save(&self, body: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write-then-rename so readers never observe a half-written table
        let temp = self.temp_path();
        tokio::fs::write(&temp, body)
            .await
            .map_err(|e| PrefixError::Cache(format!("failed to write {}: {e}", temp.display())))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| PrefixError::Cache(format!("failed to replace {}: {e}", self.path.display())))
    }
}

/// In-memory store, mainly for tests and embedding
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `body`, last modified at `modified`
    pub fn with_blob(body: impl Into<String>, modified: DateTime<Utc>) -> Self {
        Self {
            blob: Mutex::new(Some((body.into(), modified))),
        }
    }

    /// Current contents, if any
    pub async fn contents(&self) -> Option<String> {
        self.blob.lock().await.as_ref().map(|(body, _)| body.clone())
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn modified(&self) -> Option<DateTime<Utc>> {
        self.blob.lock().await.as_ref().map(|(_, at)| *at)
    }

    async fn load(&self) -> Result<String> {
        self.contents()
            .await
            .ok_or_else(|| PrefixError::Cache("nothing stored".to_string()))
    }

    async fn save(&self, body: &str) -> Result<()> {
        *self.blob.lock().await = Some((body.to_string(), Utc::now()));
        Ok(())
    }
}

#[async_trait]
impl<T: CacheStore + ?Sized> CacheStore for Arc<T> {
    async fn modified(&self) -> Option<DateTime<Utc>> {
        (**self).modified().await
    }

    async fn load(&self) -> Result<String> {
        (**self).load().await
    }

    async fn save(&self, body: &str) -> Result<()> {
        (**self).save(body).await
    }
}

#[async_trait]
impl<T: TableFetcher + ?Sized> TableFetcher for Arc<T> {
    async fn fetch_table(&self) -> Result<String> {
        (**self).fetch_table().await
    }
}
