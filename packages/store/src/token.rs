//! # Bearer-token persistence
//!
//! The dashboard keeps exactly one durable piece of client state: the access
//! token returned by `POST /token`. Everything else is re-fetched. [`TokenStore`]
//! abstracts where that token lives so the API client works the same against the
//! browser's `localStorage` ([`crate::LocalTokenStore`], web only) and an
//! in-process slot ([`crate::MemoryTokenStore`], tests and native builds).

/// Default storage key, shared with earlier builds of the dashboard.
pub const DEFAULT_TOKEN_KEY: &str = "userToken";

/// Synchronous token slot. Browser storage is synchronous, so no futures here.
pub trait TokenStore {
    /// Returns the stored token, if any.
    fn token(&self) -> Option<String>;
    /// Replaces the stored token.
    fn save_token(&self, token: &str);
    /// Removes the stored token. Clearing an empty store is a no-op.
    fn clear_token(&self);

    fn has_token(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }
}
