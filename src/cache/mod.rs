//! Cache module for remembering fetched result pages
//!
//! This module provides a session-scoped cache so that each `(query, page)`
//! pair is requested from the network at most once per session. Nothing is
//! written to disk.

mod result_cache;

pub use result_cache::{MemoryStore, ResultCache, SessionStore};
