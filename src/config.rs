use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/endpoint.json";

const DEFAULT_ENDPOINT: &str = "https://chatbot-backend-h8d0.onrender.com/";
const DEFAULT_SOCKET_PATH: &str = "/socket.io/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_socket_path")]
    pub path: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_socket_path() -> String {
    DEFAULT_SOCKET_PATH.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            path: default_socket_path(),
        }
    }
}

impl AppConfig {
    /// WebSocket URL cho kết nối: đổi scheme http(s) thành ws(s) và nối
    /// path segment của socket.
    pub fn socket_url(&self) -> String {
        let endpoint = self
            .endpoint
            .replace("http://", "ws://")
            .replace("https://", "wss://");
        format!(
            "{}/{}",
            endpoint.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
