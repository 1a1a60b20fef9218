//! Page cache with time-based revalidation
//!
//! Rendered HTML is kept per path with a staleness window. A fresh entry
//! is served as-is; an expired or absent entry makes the caller re-render
//! and store the result. This is the whole revalidation mechanism: there
//! is no eviction beyond expiry and no persistence.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct CacheEntry {
    html: String,
    rendered_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.rendered_at) < self.ttl
    }
}

/// In-memory cache of rendered pages, keyed by request path
#[derive(Default)]
pub struct PageCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached HTML for `path` if it is still within its window
    pub async fn get_fresh(&self, path: &str) -> Option<String> {
        let entries = self.entries.read().await;
        let entry = entries.get(path)?;
        if entry.is_fresh(Instant::now()) {
            Some(entry.html.clone())
        } else {
            None
        }
    }

    /// Store freshly rendered HTML with its staleness window
    pub async fn insert(&self, path: &str, html: String, ttl: Duration) {
        let mut entries = self.entries.write().await;
        entries.insert(
            path.to_string(),
            CacheEntry {
                html,
                rendered_at: Instant::now(),
                ttl,
            },
        );
    }
}
