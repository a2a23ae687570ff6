//! `localStorage`-backed preference store with an in-memory fallback.

use std::rc::Rc;

use labsindex_app::memory::MemoryPreferenceStore;
use labsindex_app::ports::PreferenceStore;
use labsindex_domain::preference::PreferenceKey;

/// `window.localStorage`. Every failing call degrades to absent / no-op.
#[derive(Clone)]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// The page's local storage, if the browser lets us reach it at all.
    #[must_use]
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        self.storage.get_item(key.as_str()).unwrap_or_else(|err| {
            tracing::debug!(%key, error = ?err, "local storage read failed");
            None
        })
    }

    fn set(&self, key: PreferenceKey, value: &str) {
        if let Err(err) = self.storage.set_item(key.as_str(), value) {
            tracing::debug!(%key, error = ?err, "local storage write failed");
        }
    }

    fn remove(&self, key: PreferenceKey) {
        if let Err(err) = self.storage.remove_item(key.as_str()) {
            tracing::debug!(%key, error = ?err, "local storage delete failed");
        }
    }
}

/// The store chosen for this page.
#[derive(Clone)]
pub enum BrowserStore {
    Local(LocalStorageStore),
    Memory(Rc<MemoryPreferenceStore>),
}

/// Local storage when reachable, otherwise memory for this page view.
#[must_use]
pub fn select_store() -> BrowserStore {
    if let Some(local) = LocalStorageStore::open() {
        BrowserStore::Local(local)
    } else {
        tracing::info!("local storage unavailable, preferences last for this page only");
        BrowserStore::Memory(Rc::new(MemoryPreferenceStore::new()))
    }
}

impl PreferenceStore for BrowserStore {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        match self {
            Self::Local(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: PreferenceKey, value: &str) {
        match self {
            Self::Local(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: PreferenceKey) {
        match self {
            Self::Local(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }
}
