use dotenv::dotenv;
use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::ConfigError;

pub const CAPTURE_DEVICE_VAR: &str = "CAPTURE_DEVICE";
pub const PORT_VAR: &str = "PORT";
pub const NETWORK_ANALYSIS_ENDPOINT_VAR: &str = "NETWORK_ANALYSIS_ENDPOINT";

pub const DEFAULT_SNAPLEN: i32 = 1600;
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_LOG_FILE: &str = "traffic_log.txt";
pub const DEFAULT_RELAY_PORT: u16 = 8080;

/// Loads `.env` from the working directory when there is one.
pub fn load_env() {
    match dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(_) => info!("No .env file found, continuing with system env"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    pub device: Option<String>,
    pub snaplen: i32,
    pub promiscuous: bool,
    pub report_interval: Duration,
    pub log_file: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: None,
            snaplen: DEFAULT_SNAPLEN,
            promiscuous: false,
            report_interval: DEFAULT_REPORT_INTERVAL,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl CaptureConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            device: non_empty(lookup(CAPTURE_DEVICE_VAR)),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayConfig {
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_RELAY_PORT,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match non_empty(lookup(PORT_VAR)) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_RELAY_PORT,
        };
        Ok(Self { port })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

/// Endpoint the traffic intake is reachable at. Nothing in the capture path reads it.
pub fn network_analysis_endpoint() -> Option<String> {
    non_empty(env::var(NETWORK_ANALYSIS_ENDPOINT_VAR).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn capture_device_comes_from_env() {
        let env = vars(&[("CAPTURE_DEVICE", "eth0")]);
        let config = CaptureConfig::from_lookup(|k| env.get(k).cloned());
        assert_eq!(config.device.as_deref(), Some("eth0"));
        assert_eq!(config.snaplen, 1600);
        assert!(!config.promiscuous);
        assert_eq!(config.report_interval, Duration::from_secs(30));
        assert_eq!(config.log_file, PathBuf::from("traffic_log.txt"));
    }

    #[test]
    fn empty_capture_device_is_unset() {
        let env = vars(&[("CAPTURE_DEVICE", "")]);
        let config = CaptureConfig::from_lookup(|k| env.get(k).cloned());
        assert_eq!(config.device, None);
    }

    #[test]
    fn relay_port_defaults_to_8080() {
        let config = RelayConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 8080);

        let env = vars(&[("PORT", "")]);
        let config = RelayConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn relay_port_is_parsed() {
        let env = vars(&[("PORT", "9001")]);
        let config = RelayConfig::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(config.port, 9001);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:9001");
    }

    #[test]
    fn bad_relay_port_is_rejected() {
        let env = vars(&[("PORT", "http")]);
        let err = RelayConfig::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));
    }
}
