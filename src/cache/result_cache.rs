//! Session cache for fetched result pages
//!
//! Provides a `ResultCache` that remembers every page fetched during a
//! session, keyed by query and page number, on top of a string-keyed
//! `SessionStore`.

use std::collections::HashMap;
use std::fmt;

use crate::data::ResultPage;

/// A string-keyed, string-valued store that lives as long as the session
pub trait SessionStore: Send {
    /// Returns the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: String, value: String);

    /// Number of stored entries
    fn len(&self) -> usize;

    /// Whether the store holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory session store, dropped with the session
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Maps `(query, page)` to the `ResultPage` fetched for it this session
///
/// Entries are stored as JSON under the key `"<query>_<page>"`. The key is
/// used verbatim: no trimming or case folding, so `"Cats"` and `"cats"` are
/// different entries. There is no eviction and no expiry.
pub struct ResultCache {
    store: Box<dyn SessionStore>,
}

impl fmt::Debug for ResultCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache")
            .field("entries", &self.store.len())
            .finish()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    /// Creates an empty cache backed by a `MemoryStore`
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    /// Creates a cache on top of a custom store
    pub fn with_store(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Builds the cache key for a query and page
    pub fn key(query: &str, page: u32) -> String {
        format!("{}_{}", query, page)
    }

    /// Returns the cached page for `(query, page)`
    ///
    /// An entry that no longer decodes is treated as absent.
    pub fn get(&self, query: &str, page: u32) -> Option<ResultPage> {
        let key = Self::key(query, page);
        let raw = self.store.get(&key)?;
        match serde_json::from_str(&raw) {
            Ok(result_page) => Some(result_page),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding undecodable cache entry");
                None
            }
        }
    }

    /// Stores a page for `(query, page)`, overwriting any previous entry
    pub fn put(&mut self, query: &str, page: u32, result_page: &ResultPage) {
        let key = Self::key(query, page);
        match serde_json::to_string(result_page) {
            Ok(json) => self.store.set(key, json),
            Err(e) => tracing::warn!(key = %key, error = %e, "failed to serialize result page"),
        }
    }

    /// Whether a page for `(query, page)` is cached
    pub fn contains(&self, query: &str, page: u32) -> bool {
        self.get(query, page).is_some()
    }

    /// Number of cached pages
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
