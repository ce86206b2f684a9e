//! # `localStorage` token store: browser-side persistence
//!
//! [`LocalTokenStore`] is the [`TokenStore`] used on the **web platform**. It keeps
//! the bearer token under a single fixed key in `window.localStorage`, so a page
//! reload keeps the user signed in while every other piece of session state is
//! fetched again.
//!
//! ## Error handling
//!
//! Storage can be unavailable (private browsing, disabled cookies, quota). All
//! methods log the failure and degrade to "no token", which sends the user back
//! to the login view instead of breaking the page.

use web_sys::Storage;

use crate::token::TokenStore;

#[derive(Clone, Debug)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Option<Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("localStorage unavailable: {:?}", e);
                None
            }
        }
    }
}

impl TokenStore for LocalTokenStore {
    fn token(&self) -> Option<String> {
        self.storage()?.get_item(&self.key).ok().flatten()
    }

    fn save_token(&self, token: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if let Err(e) = storage.set_item(&self.key, token) {
            tracing::warn!("Failed to persist token: {:?}", e);
        }
    }

    fn clear_token(&self) {
        let Some(storage) = self.storage() else {
            return;
        };
        if let Err(e) = storage.remove_item(&self.key) {
            tracing::warn!("Failed to clear token: {:?}", e);
        }
    }
}
