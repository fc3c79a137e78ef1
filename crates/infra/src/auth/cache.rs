//! Per-provider token cache keyed by canonical scope set

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use forge_domain::AccessToken;

/// Map from [`scope_key`](forge_domain::scope_key) to the last token issued
/// for that scope set.
///
/// Entries are only replaced, never evicted. Reads and writes take a shard
/// lock for the duration of the map operation and never across an `.await`.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: DashMap<String, AccessToken>,
}

impl TokenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached token for `key` if it is still valid at `now`
    #[must_use]
    pub fn get_valid(&self, key: &str, now: DateTime<Utc>) -> Option<AccessToken> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_valid_at(now))
            .map(|entry| entry.value().clone())
    }

    /// Store `token`, replacing any previous entry for `key`
    pub fn insert(&self, key: impl Into<String>, token: AccessToken) {
        self.entries.insert(key.into(), token);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
