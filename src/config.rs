use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/client.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL cho REST (đăng nhập, danh sách user, lịch sử).
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// URL kênh sự kiện WebSocket.
    #[serde(default = "default_socket_url")]
    pub socket_url: String,
}

fn default_server_url() -> String {
    "http://127.0.0.1:4000".to_owned()
}

fn default_socket_url() -> String {
    "ws://127.0.0.1:4000/ws".to_owned()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            socket_url: default_socket_url(),
        }
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
