//! Best-effort index cache over a [`KeyValueStore`].

use super::{KeyValueStore, MemoryStore};
use crate::index::{IndexBuilder, IndexSnapshot, SearchIndex, SnapshotCodec};
use crate::types::{IndexConfig, IndexMode};
use tracing::{debug, warn};

const DEFAULT_NAMESPACE: &str = "typeahead_indices";

/// Loads indices from a store, rebuilding on any kind of miss.
///
/// Snapshots are keyed by namespace and index mode. A snapshot is only
/// reused when its item fingerprint matches the requested collection and
/// its config fingerprint matches the requested [`IndexConfig`]. Nothing
/// here ever fails the caller: read and write errors are logged and
/// treated as a miss.
pub struct IndexCache<S = MemoryStore> {
    store: Option<S>,
    namespace: String,
    codec: SnapshotCodec,
}

impl IndexCache {
    /// A cache with no backing store; every load is a miss.
    pub fn disabled() -> Self {
        Self {
            store: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            codec: SnapshotCodec::default(),
        }
    }
}

impl<S: KeyValueStore> IndexCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Some(store),
            namespace: DEFAULT_NAMESPACE.to_string(),
            codec: SnapshotCodec::default(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_codec(mut self, codec: SnapshotCodec) -> Self {
        self.codec = codec;
        self
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn into_store(self) -> Option<S> {
        self.store
    }

    pub fn key(&self, mode: IndexMode) -> String {
        format!("{}:{}", self.namespace, mode)
    }

    /// Returns the cached index for `items`, if a usable one is stored.
    pub fn load<T: AsRef<str>>(&self, items: &[T], config: &IndexConfig) -> Option<SearchIndex> {
        let store = self.store.as_ref()?;
        let key = self.key(config.mode);

        let bytes = match store.get(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(%key, "index cache miss");
                return None;
            }
            Err(e) => {
                warn!(%key, error = %e, "could not read cached index");
                return None;
            }
        };

        let index = match IndexSnapshot::from_bytes(&bytes).and_then(IndexSnapshot::restore) {
            Ok(index) => index,
            Err(e) => {
                warn!(%key, error = %e, "discarding unreadable cached index");
                return None;
            }
        };

        if !index.matches_items(items) {
            debug!(%key, "cached index belongs to another collection");
            return None;
        }
        if !index.built_with(config) {
            debug!(%key, "cached index was built with other settings");
            return None;
        }

        debug!(%key, items = index.item_count(), "index cache hit");
        Some(index)
    }

    /// Stores `index`; returns whether the write went through.
    pub fn save(&mut self, index: &SearchIndex) -> bool {
        let key = self.key(index.mode());
        let Some(store) = self.store.as_mut() else {
            return false;
        };

        let bytes = match IndexSnapshot::capture(index).to_bytes(self.codec) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%key, error = %e, "could not encode index");
                return false;
            }
        };

        match store.put(&key, &bytes) {
            Ok(()) => {
                debug!(%key, bytes = bytes.len(), "cached index");
                true
            }
            Err(e) => {
                warn!(%key, error = %e, "could not cache index");
                false
            }
        }
    }

    /// Cached index for `items`, or a fresh build that is then cached.
    pub fn load_or_build<T: AsRef<str>>(&mut self, items: &[T], config: &IndexConfig) -> SearchIndex {
        if let Some(index) = self.load(items, config) {
            return index;
        }

        let index = IndexBuilder::new(config.clone()).build(items);
        self.save(&index);
        index
    }
}
