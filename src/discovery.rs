use crate::config::Config;
use crate::types::Target;
use futures::stream::{self, StreamExt};
use log::{debug, info};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// TCP connect liveness check used to drop closed hosts before the
/// expensive RTSP stage. No protocol bytes are exchanged.
pub struct PortProber {
    timeout: Duration,
    concurrency: usize,
}

impl PortProber {
    pub fn new(timeout: Duration, concurrency: usize) -> Self {
        Self {
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.timeout(), config.probe_worker_count())
    }

    /// Whether a TCP handshake to the target completes within the timeout.
    pub async fn is_open(&self, target: &Target) -> bool {
        match timeout(self.timeout, TcpStream::connect(target.as_str())).await {
            Ok(Ok(_stream)) => {
                debug!("Port open on {}", target);
                true
            }
            Ok(Err(e)) => {
                debug!("Connect to {} failed: {}", target, e);
                false
            }
            Err(_) => {
                debug!("Connect to {} timed out", target);
                false
            }
        }
    }

    /// Probe the whole batch on the prober's own pool and keep the open ones.
    pub async fn filter_open(&self, targets: Vec<Target>) -> Vec<Target> {
        let total = targets.len();

        let open: Vec<Target> = stream::iter(targets)
            .map(|target| async move {
                let open = self.is_open(&target).await;
                (target, open)
            })
            .buffer_unordered(self.concurrency)
            .filter_map(|(target, open)| async move { open.then_some(target) })
            .collect()
            .await;

        info!("Found {} of {} hosts with the RTSP port open", open.len(), total);
        open
    }
}
