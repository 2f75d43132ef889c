//! Browser-side settings: where the API lives and list defaults.
//!
//! The host binary serves these as `/client-config.json`; the compiled-in
//! defaults apply when the file is missing.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fallback API base URL (overridable at build time with `EDU_ADMIN_API_URL`).
pub const DEFAULT_API_BASE_URL: &str = match option_env!("EDU_ADMIN_API_URL") {
    Some(url) => url,
    None => "http://192.168.1.98:52563/api",
};

pub const CLIENT_CONFIG_PATH: &str = "/client-config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub default_page_size: u32,
    pub page_size_options: Vec<u32>,
    pub session_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_page_size: 10,
            page_size_options: vec![10, 25, 50],
            session_key: "edu-admin-session".to_string(),
        }
    }
}

impl ClientConfig {
    /// Page-size choices, always including the default.
    pub fn page_sizes(&self) -> Vec<u32> {
        let mut sizes = self.page_size_options.clone();
        if !sizes.contains(&self.default_page_size) {
            sizes.push(self.default_page_size);
        }
        sizes.retain(|s| *s > 0);
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }

    /// Load `/client-config.json` from `origin`, falling back to defaults.
    pub async fn fetch(origin: &str) -> Self {
        let url = format!("{}{}", origin.trim_end_matches('/'), CLIENT_CONFIG_PATH);
        let result = async {
            reqwest::get(&url)
                .await?
                .error_for_status()?
                .json::<ClientConfig>()
                .await
        }
        .await;

        match result {
            Ok(config) => {
                info!(api = %config.api_base_url, "Loaded client config");
                config
            }
            Err(e) => {
                debug!(error = %e, "No client config served, using defaults");
                Self::default()
            }
        }
    }
}

/// Origin of the page the app is running on.
pub fn page_origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"api_base_url":"https://api.example.test/api"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.test/api");
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.session_key, "edu-admin-session");
    }

    #[test]
    fn test_page_sizes_include_default() {
        let config = ClientConfig {
            default_page_size: 20,
            page_size_options: vec![50, 10, 0, 10],
            ..Default::default()
        };
        assert_eq!(config.page_sizes(), vec![10, 20, 50]);
    }
}
