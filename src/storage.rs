use glim_core::session::KeyValueStore;
use web_sys as web;

/// `window.localStorage` behind the session's key-value seam. When storage is
/// unavailable (private mode, sandboxed iframe) every read misses and writes
/// are dropped with a warning.
#[derive(Clone)]
pub struct LocalStore {
    storage: Option<web::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("[storage] localStorage unavailable; session will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(s) = &self.storage {
            if let Err(e) = s.set_item(key, value) {
                log::warn!("[storage] set {key} failed: {:?}", e);
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(s) = &self.storage {
            _ = s.remove_item(key);
        }
    }
}
