// src/template_cache/mod.rs
//! Template-fragment cache invalidation.
//!
//! The key derivation here must stay byte-for-byte compatible with the host
//! templating engine's fragment-cache scheme: each argument is URL-quoted,
//! the quoted arguments are joined with `:`, the joined string is MD5-hashed,
//! and the digest is formatted into `template.cache.<fragment>.<hex>`. If the
//! rendering layer ever changes its key scheme, this must change with it.

use std::collections::HashMap;
use std::sync::Mutex;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

// URL-quoting with `/` (and the unreserved set) left alone.
const QUOTE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode `s` the way the host engine quotes fragment arguments.
pub fn quote(s: &str) -> String {
    utf8_percent_encode(s, QUOTE_SAFE).to_string()
}

/// Compute the cache key the rendering layer would use for `fragment_name`
/// with `args`. Deterministic, and sensitive to every argument.
pub fn fragment_cache_key<S: AsRef<str>>(fragment_name: &str, args: &[S]) -> String {
    let joined = args
        .iter()
        .map(|a| quote(a.as_ref()))
        .collect::<Vec<_>>()
        .join(":");
    let digest = md5::compute(joined.as_bytes());
    format!("template.cache.{}.{:x}", fragment_name, digest)
}

/// A cache backend that can drop keys. The backend is handed in by the
/// caller; this module never reaches for a global cache.
pub trait CacheStore {
    /// Remove `key`. Returns whether the key was present.
    fn delete(&self, key: &str) -> bool;
}

/// Compute the fragment key, delete it from `store`, and return the key so
/// callers can log or chain it.
pub fn invalidate_fragment<S: AsRef<str>>(
    store: &dyn CacheStore,
    fragment_name: &str,
    args: &[S],
) -> String {
    let key = fragment_cache_key(fragment_name, args);
    let existed = store.delete(&key);
    debug!(%key, existed, "invalidated template fragment");
    key
}

/// A minimal in-memory cache. Mostly useful in tests and single-process
/// setups; anything real should implement [`CacheStore`] over its backend.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("cache lock")
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("cache lock").get(key).cloned()
    }
}

impl CacheStore for MemoryCache {
    fn delete(&self, key: &str) -> bool {
        self.entries.lock().expect("cache lock").remove(key).is_some()
    }
}
