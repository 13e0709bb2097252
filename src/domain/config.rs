use serde::{Deserialize, Serialize};

pub const DEFAULT_API_SERVER_URL: &str = "https://api.ever.team/api";
pub const DEFAULT_PUBLIC_API_SERVER_URL: &str = "https://api.ever.team";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_file: String,
    // None means the current Monday..Sunday week.
    // "WEEK" | "MONTH" | "YYYY-MM-DD..YYYY-MM-DD"
    pub default_date_range: Option<String>,
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: "timesheet.json".to_string(),
            default_date_range: None,
            theme: default_theme(),
        }
    }
}

fn default_theme() -> String {
    "tokyo-night".to_string()
}

/// Server runtime settings of the hosting web server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRuntimeConfig {
    #[serde(rename = "GAUZY_API_SERVER_URL")]
    pub gauzy_api_server_url: String,
    #[serde(rename = "NEXT_PUBLIC_GAUZY_API_SERVER_URL")]
    pub next_public_gauzy_api_server_url: String,
}

impl ServerRuntimeConfig {
    pub fn fallback() -> Self {
        Self {
            gauzy_api_server_url: env_or("GAUZY_API_SERVER_URL", DEFAULT_API_SERVER_URL),
            next_public_gauzy_api_server_url: env_or(
                "NEXT_PUBLIC_GAUZY_API_SERVER_URL",
                DEFAULT_PUBLIC_API_SERVER_URL,
            ),
        }
    }
}

impl Default for ServerRuntimeConfig {
    fn default() -> Self {
        Self::fallback()
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|value| value.replace('"', "").trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
