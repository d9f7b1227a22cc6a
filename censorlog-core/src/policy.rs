//! policy.rs - The censor policy store.
//!
//! Holds the ordered, de-duplicated list of redaction keys a logger applies.
//! Each update swaps in a fresh, fully compiled snapshot under a write lock,
//! so readers see either the old list or the new one, never a mix.
//!
//! A policy is an ordinary value that can be owned by one logger or shared
//! between several through an `Arc`. [`CensorPolicy::shared`] hands out the
//! process-wide default instance.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};
use once_cell::sync::Lazy;

use crate::config::CensorConfig;
use crate::errors::CensorError;
use crate::key::RedactionKey;
use crate::sanitizers::compiler::{compile_key, CompiledKey};

static SHARED_POLICY: Lazy<Arc<CensorPolicy>> = Lazy::new(|| Arc::new(CensorPolicy::new()));

#[derive(Debug)]
pub struct CensorPolicy {
    keys: RwLock<Arc<[CompiledKey]>>,
}

impl CensorPolicy {
    /// An empty policy.
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// A policy seeded with `keys`, de-duplicated.
    pub fn with_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<RedactionKey>,
    {
        let policy = Self::new();
        policy.set(keys);
        policy
    }

    /// A policy seeded from a loaded configuration.
    pub fn from_config(config: &CensorConfig) -> Result<Self, CensorError> {
        Ok(Self::with_keys(config.to_keys()?))
    }

    /// The process-wide default policy.
    pub fn shared() -> Arc<CensorPolicy> {
        Arc::clone(&SHARED_POLICY)
    }

    /// Returns the current keys in order. Empty if never set.
    pub fn get(&self) -> Vec<RedactionKey> {
        self.snapshot().iter().map(|c| c.key.clone()).collect()
    }

    /// Replaces the stored keys with `keys`, keeping only the first
    /// occurrence of each, and returns the stored list.
    ///
    /// Every key is compiled before the swap. A key whose matcher cannot be
    /// built is dropped with a warning; the rest of the update still applies.
    pub fn set<I, K>(&self, keys: I) -> Vec<RedactionKey>
    where
        I: IntoIterator<Item = K>,
        K: Into<RedactionKey>,
    {
        let mut seen = HashSet::new();
        let mut compiled = Vec::new();

        for key in keys.into_iter().map(Into::into) {
            if !seen.insert(key.clone()) {
                continue;
            }
            match compile_key(&key) {
                Ok(c) => compiled.push(c),
                Err(e) => warn!("Dropping redaction key '{}': {}", key, e),
            }
        }

        debug!("Censor policy updated with {} key(s).", compiled.len());
        let snapshot: Arc<[CompiledKey]> = Arc::from(compiled);
        *self.keys.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);

        snapshot.iter().map(|c| c.key.clone()).collect()
    }

    /// Getter/setter in one: `None` reads, `Some(keys)` replaces then reads.
    pub fn censor(&self, keys: Option<Vec<RedactionKey>>) -> Vec<RedactionKey> {
        match keys {
            Some(keys) => self.set(keys),
            None => self.get(),
        }
    }

    /// The compiled keys currently in force.
    pub fn snapshot(&self) -> Arc<[CompiledKey]> {
        let guard = self.keys.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl Default for CensorPolicy {
    fn default() -> Self {
        Self::new()
    }
}
