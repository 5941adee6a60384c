//! Camscan - RTSP Camera Credential Auditor
//!
//! This library discovers RTSP video streams that accept weak or default
//! credentials, enumerates vendor stream paths against them and reports
//! validated, playable stream URLs.
//!
//! # Warning
//! This tool is designed for ethical penetration testing and security assessment
//! purposes only. Users are responsible for ensuring they have proper authorization
//! before scanning any networks or systems.

pub mod cli;
pub mod config;
pub mod targets;
pub mod discovery;
pub mod paths;
pub mod rtsp;
pub mod fingerprint;
pub mod store;
pub mod probe;
pub mod scanner;
pub mod reporting;
pub mod display;
pub mod utils;
pub mod error;

pub use error::{Result, ScanError};

/// Common types used throughout the application
pub mod types {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// Port appended to targets given without one.
    pub const DEFAULT_RTSP_PORT: u16 = 554;

    /// A `host:port` pair. Only normalization is applied, malformed entries
    /// are kept and fail at connect time.
    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Target(String);

    impl Target {
        pub fn new(raw: &str) -> Self {
            Self::with_default_port(raw, DEFAULT_RTSP_PORT)
        }

        pub fn with_default_port(raw: &str, port: u16) -> Self {
            let raw = raw.trim();
            if raw.contains(':') {
                Target(raw.to_string())
            } else {
                Target(format!("{}:{}", raw, port))
            }
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for Target {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Credentials {
        pub username: String,
        pub password: String,
    }

    impl Credentials {
        pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
            Self {
                username: username.into(),
                password: password.into(),
            }
        }
    }

    impl fmt::Display for Credentials {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}:{}", self.username, self.password)
        }
    }

    /// Unit of work on the queue. The path is `/` for every queued job,
    /// vendor paths are only tried inside the probe engine.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Job {
        pub target: Target,
        pub credentials: Credentials,
        pub path: String,
    }

    impl Job {
        pub fn root(target: Target, credentials: Credentials) -> Self {
            Self {
                target,
                credentials,
                path: "/".to_string(),
            }
        }
    }

    /// A confirmed, playable stream.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Finding {
        pub target: Target,
        pub credentials: Credentials,
        pub path: String,
        pub fingerprint: String,
        pub url: String,
        pub discovered_at: DateTime<Utc>,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum ProbeOutcome {
        /// Media described and at least one packet received in time.
        StreamConfirmed,
        /// The server rejected the credentials.
        CredentialInvalid,
        /// Not found, no media, timeouts and everything else.
        PathOrOtherFailure,
    }

    /// Outcome of testing one URL plus what the server said.
    #[derive(Debug, Clone)]
    pub struct ProbeResult {
        pub outcome: ProbeOutcome,
        pub status: Option<u16>,
        pub response: String,
    }

    impl ProbeResult {
        pub fn confirmed(response: String) -> Self {
            Self {
                outcome: ProbeOutcome::StreamConfirmed,
                status: Some(200),
                response,
            }
        }

        pub fn failure(status: Option<u16>, response: String) -> Self {
            let outcome = if status == Some(401) {
                ProbeOutcome::CredentialInvalid
            } else {
                ProbeOutcome::PathOrOtherFailure
            };
            Self {
                outcome,
                status,
                response,
            }
        }

        pub fn is_confirmed(&self) -> bool {
            self.outcome == ProbeOutcome::StreamConfirmed
        }

        /// The server authenticated the request and only failed to resolve the path.
        pub fn signals_not_found(&self) -> bool {
            self.status == Some(404)
        }
    }
}
