use log::{info, warn};
use std::net::SocketAddr;
use std::path::PathBuf;

use wedding_shared::api::DEFAULT_API_URL;
use wedding_shared::services::MockSource;

pub const DEFAULT_WEDDING_ID: &str = "wedding_001";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Startup settings, read once from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the invitation API (`API_URL`)
    pub api_url: String,
    /// Wedding loaded when the page is first shown (`WEDDING_ID`)
    pub wedding_id: String,
    /// Listen address (`BIND_ADDR`)
    pub bind_addr: SocketAddr,
    /// Remember that a visitor opened the invitation (`REMEMBER_COVER`)
    pub remember_cover: bool,
    /// Fallback wedding fixture (`WEDDING_MOCK_PATH`)
    pub mock_source: MockSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            wedding_id: DEFAULT_WEDDING_ID.to_string(),
            bind_addr: default_bind_addr(),
            remember_cover: true,
            mock_source: MockSource::Embedded,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparseable values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(api_url) = lookup("API_URL").filter(|v| !v.trim().is_empty()) {
            config.api_url = api_url;
        }

        if let Some(wedding_id) = lookup("WEDDING_ID").filter(|v| !v.trim().is_empty()) {
            config.wedding_id = wedding_id;
        }

        if let Some(bind_addr) = lookup("BIND_ADDR") {
            match bind_addr.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => warn!(
                    "Invalid BIND_ADDR '{}' ({}), using {}",
                    bind_addr, e, DEFAULT_BIND_ADDR
                ),
            }
        }

        if let Some(remember) = lookup("REMEMBER_COVER") {
            match remember.to_lowercase().as_str() {
                "true" | "1" | "yes" => config.remember_cover = true,
                "false" | "0" | "no" => config.remember_cover = false,
                other => warn!("Invalid REMEMBER_COVER '{}', keeping true", other),
            }
        }

        if let Some(path) = lookup("WEDDING_MOCK_PATH").filter(|v| !v.trim().is_empty()) {
            config.mock_source = MockSource::File(PathBuf::from(path));
        }

        info!(
            "Config: api_url={}, wedding_id={}, bind_addr={}, remember_cover={}",
            config.api_url, config.wedding_id, config.bind_addr, config.remember_cover
        );
        config
    }
}
