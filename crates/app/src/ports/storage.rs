//! Storage port — best-effort persistence of preference values.

use std::rc::Rc;

use labsindex_domain::preference::PreferenceKey;

/// Key-value persistence that may be unavailable at any moment.
///
/// Every method is total. Implementations translate faults of the
/// underlying medium (disabled, quota exceeded, sandboxed) into "absent"
/// on read and a silent no-op on write. No retries, no write-behind.
pub trait PreferenceStore {
    /// Stored value, or `None` when unset or unreachable.
    fn get(&self, key: PreferenceKey) -> Option<String>;

    /// Best-effort write.
    fn set(&self, key: PreferenceKey, value: &str);

    /// Best-effort delete.
    fn remove(&self, key: PreferenceKey);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Rc<T> {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: PreferenceKey, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: PreferenceKey) {
        (**self).remove(key);
    }
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get(&self, key: PreferenceKey) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: PreferenceKey, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: PreferenceKey) {
        (**self).remove(key);
    }
}
