//! # Client configuration: `obra.toml`
//!
//! Settings the dashboard needs before it can talk to the backend. The web build
//! starts from [`ClientConfig::default`] and resolves the API base URL from the
//! page origin; a TOML document can override any field.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = ""                 # empty = derive from the page origin
//!
//! [storage]
//! token_key = "userToken"       # localStorage key for the bearer token
//!
//! [ui]
//! toast_duration_ms = 3000      # how long a notification stays on screen
//! timeline_limit = 10           # expenses shown in the client timeline
//!
//! [contact]
//! whatsapp = "553499436350"     # number used by the client contact buttons
//! ```
//!
//! Every section derives `Default`, so a missing or partial file is equivalent
//! to the defaults for whatever it leaves out.

use serde::{Deserialize, Serialize};

use crate::token::DEFAULT_TOKEN_KEY;

/// Backend used when the dashboard is served from a local dev server.
pub const LOCAL_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub contact: ContactConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without trailing slash.
    /// Empty string means "resolve from the page origin".
    #[serde(default)]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

fn default_token_key() -> String {
    DEFAULT_TOKEN_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u32,
    #[serde(default = "default_timeline_limit")]
    pub timeline_limit: usize,
}

fn default_toast_duration() -> u32 {
    3000
}

fn default_timeline_limit() -> usize {
    10
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration(),
            timeline_limit: default_timeline_limit(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactConfig {
    /// WhatsApp number in international format, digits only.
    #[serde(default = "default_whatsapp")]
    pub whatsapp: String,
}

fn default_whatsapp() -> String {
    "553499436350".to_string()
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp: default_whatsapp(),
        }
    }
}

impl ContactConfig {
    /// `wa.me` link with a pre-filled, percent-encoded message.
    pub fn whatsapp_link(&self, message: &str) -> String {
        // A literal `+` is serialized as `%2B`, so every remaining `+` is a space
        let text = url::form_urlencoded::byte_serialize(message.as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        format!("https://wa.me/{}?text={}", self.whatsapp, text)
    }
}

impl ClientConfig {
    /// Create a config pointing at an explicit backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
            },
            ..Self::default()
        }
    }

    /// Builder method to set the token storage key.
    pub fn with_token_key(mut self, key: impl Into<String>) -> Self {
        self.storage.token_key = key.into();
        self
    }

    /// Builder method to set how long toasts stay visible.
    pub fn with_toast_duration(mut self, ms: u32) -> Self {
        self.ui.toast_duration_ms = ms;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "obra.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The backend base URL for a page served from `origin`.
    ///
    /// An explicit `api.base_url` always wins. Otherwise hosted previews
    /// (`replit.dev`) and production serve the API from the page origin, while
    /// local dev servers talk to the backend on port 8000.
    pub fn resolve_base_url(&self, origin: &str) -> String {
        let explicit = self.api.base_url.trim_end_matches('/');
        if !explicit.is_empty() {
            return explicit.to_string();
        }
        let origin = origin.trim_end_matches('/');
        if origin.contains("replit.dev") {
            origin.to_string()
        } else if origin.contains("localhost") || origin.contains("127.0.0.1") {
            LOCAL_BACKEND_URL.to_string()
        } else {
            origin.to_string()
        }
    }
}
