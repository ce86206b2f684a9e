pub mod config;
pub mod token;

mod memory;
pub use memory::MemoryTokenStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalTokenStore;

pub use config::ClientConfig;
pub use token::{TokenStore, DEFAULT_TOKEN_KEY};

/// Token store used by the running app on this platform.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformTokenStore = LocalTokenStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformTokenStore = MemoryTokenStore;

/// Create the platform token store for `config`.
pub fn platform_token_store(config: &ClientConfig) -> PlatformTokenStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        LocalTokenStore::new(config.storage.token_key.clone())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let _ = config;
        MemoryTokenStore::new()
    }
}
