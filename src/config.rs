use crate::paths::{default_paths, CREDENTIAL_CHECK_PATH};
use crate::types::DEFAULT_RTSP_PORT;
use crate::utils::wordlist;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Hard ceiling on concurrent RTSP workers.
pub const MAX_WORKERS: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scan: ScanConfig,
    pub discovery: DiscoveryConfig,
    pub rtsp: RtspConfig,
    pub wordlists: WordlistConfig,
    pub reporting: ReportingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub workers: usize,
    pub timeout: u64, // seconds
    /// Stop once this many vulnerable hosts are confirmed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default)]
    pub port_probe: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub probe_workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RtspConfig {
    pub default_port: u16,
    pub user_agent: String,
    pub credential_check_path: String,
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordlistConfig {
    pub usernames: Vec<String>,
    pub passwords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_report: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig {
                workers: 20,
                timeout: 3,
                limit: None,
                port_probe: false,
            },
            discovery: DiscoveryConfig {
                probe_workers: 1000,
            },
            rtsp: RtspConfig {
                default_port: DEFAULT_RTSP_PORT,
                user_agent: "Camscan/1.0".to_string(),
                credential_check_path: CREDENTIAL_CHECK_PATH.to_string(),
                paths: default_paths(),
            },
            wordlists: WordlistConfig {
                usernames: wordlist::default_usernames(),
                passwords: wordlist::default_passwords(),
            },
            reporting: ReportingConfig {
                output_file: None,
                json_report: None,
            },
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn save_to_file(&self, path: &str) -> crate::Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| crate::ScanError::Unknown(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)?;
        Ok(())
    }

    /// Ceiling for every network wait (connect, describe, setup, play, first packet).
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.scan.timeout.max(1))
    }

    pub fn worker_count(&self) -> usize {
        self.scan.workers.clamp(1, MAX_WORKERS)
    }

    pub fn probe_worker_count(&self) -> usize {
        self.discovery.probe_workers.max(1)
    }

    pub fn finding_limit(&self) -> Option<usize> {
        self.scan.limit.map(|l| l as usize)
    }
}
