use dioxus::prelude::*;

use store::ClientConfig;
use ui::{AppShell, SessionProvider};

const CONFIG_TOML: &str = include_str!("../obra.toml");

fn main() {
    dioxus::launch(App);
}

fn load_config() -> ClientConfig {
    match ClientConfig::from_toml(CONFIG_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {}", ClientConfig::filename(), e);
            ClientConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Title { "Gestão de Obras" }
        SessionProvider {
            config: config,
            AppShell {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_parses() {
        let config = ClientConfig::from_toml(CONFIG_TOML).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.resolve_base_url("http://localhost:8080"), "http://127.0.0.1:8000");
    }
}
