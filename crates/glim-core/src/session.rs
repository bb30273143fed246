//! Login session persistence.
//!
//! The token and the serialized user are kept under two fixed keys. The
//! browser build backs this with `localStorage`; tests use [`MemoryStore`].

use super::api::AuthResponse;
use super::user::User;
use fnv::FnvHashMap;

pub const TOKEN_KEY: &str = "@Glim:token";
pub const USER_KEY: &str = "@Glim:user";

/// Minimal string key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: FnvHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    /// Read whatever was persisted. A stored user that no longer parses is
    /// treated as signed out and cleared.
    pub fn restore<S: KeyValueStore + ?Sized>(store: &mut S) -> Self {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = match store.get(USER_KEY) {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("[session] dropping unreadable stored user: {e}");
                    store.remove(USER_KEY);
                    None
                }
            },
            None => None,
        };
        match (token, user) {
            (Some(token), Some(user)) => Self {
                token: Some(token),
                user: Some(user),
            },
            (token, None) => Self { token, user: None },
            (None, Some(_)) => {
                // User without a token cannot call the backend.
                store.remove(USER_KEY);
                Self::default()
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Store a successful login/register and adopt it.
    pub fn persist<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, auth: AuthResponse) {
        store.set(TOKEN_KEY, &auth.token);
        match serde_json::to_string(&auth.user) {
            Ok(json) => store.set(USER_KEY, &json),
            Err(e) => log::warn!("[session] could not serialize user: {e}"),
        }
        log::info!("[session] signed in as {}", auth.user.email);
        self.token = Some(auth.token);
        self.user = Some(auth.user);
    }

    pub fn sign_out<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        store.remove(TOKEN_KEY);
        store.remove(USER_KEY);
        self.token = None;
        self.user = None;
        log::info!("[session] signed out");
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

/// `Authorization` header value for a stored token, if any.
pub fn bearer_header<S: KeyValueStore + ?Sized>(store: &S) -> Option<String> {
    store
        .get(TOKEN_KEY)
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {t}"))
}
