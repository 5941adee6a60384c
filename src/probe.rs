use crate::config::Config;
use crate::fingerprint;
use crate::paths;
use crate::reporting::Reporter;
use crate::rtsp::{Connector, RtspSession, RtspUrl};
use crate::store::{FoundState, HostConfirmation};
use crate::types::{Credentials, Finding, Job, ProbeResult, Target};
use chrono::Utc;
use log::{debug, error, info, trace, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{sleep, timeout};

/// Path shown for hosts that stream on the root path, whatever is asked for.
pub const ANY_PATH: &str = "Accepts any path";

/// Shared receiving end of the work queue.
pub type JobQueue = Arc<Mutex<mpsc::Receiver<Job>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMode {
    /// DESCRIBE only, media presence is enough.
    CredentialCheck,
    /// DESCRIBE, SETUP, PLAY and wait for the first packet.
    Stream,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobControl {
    Continue,
    Stop,
}

/// Worker logic: credential-then-path elimination against one host per job.
pub struct ProbeEngine {
    connector: Arc<dyn Connector>,
    state: Arc<FoundState>,
    reporter: Arc<Reporter>,
    paths: Vec<String>,
    credential_check_path: String,
    timeout: Duration,
}

impl ProbeEngine {
    pub fn new(
        connector: Arc<dyn Connector>,
        state: Arc<FoundState>,
        reporter: Arc<Reporter>,
        config: &Config,
    ) -> Self {
        Self {
            connector,
            state,
            reporter,
            paths: config.rtsp.paths.clone(),
            credential_check_path: config.rtsp.credential_check_path.clone(),
            timeout: config.timeout(),
        }
    }

    /// Drain the queue until it is closed or the quota is met.
    pub async fn run_worker(&self, queue: JobQueue) {
        // per-worker memo, duplicates routed to other workers are not caught
        let mut tested: HashSet<(Target, Credentials)> = HashSet::new();

        loop {
            let job = {
                let mut rx = queue.lock().await;
                rx.recv().await
            };
            let Some(job) = job else { break };

            if self.process_job(&job, &mut tested).await == JobControl::Stop {
                debug!("Finding limit reached, worker exiting");
                break;
            }
        }
    }

    pub async fn process_job(&self, job: &Job, tested: &mut HashSet<(Target, Credentials)>) -> JobControl {
        if self.state.quota_reached() {
            return JobControl::Stop;
        }
        if self.state.is_host_confirmed(&job.target) {
            return JobControl::Continue;
        }
        if !tested.insert((job.target.clone(), job.credentials.clone())) {
            return JobControl::Continue;
        }

        debug!("[TEST] {} [{}]", job.target, job.credentials);

        let root_url = RtspUrl::new(&job.credentials, &job.target, &job.path);
        let root = self.test_url(&root_url, ProbeMode::Stream).await;
        if root.is_confirmed() {
            if self.state.quota_reached() {
                return JobControl::Stop;
            }
            if self.emit_finding(job, ANY_PATH, &root_url, &root).await == HostConfirmation::QuotaFull {
                return JobControl::Stop;
            }
            return JobControl::Continue;
        }

        let check_url = RtspUrl::new(&job.credentials, &job.target, &self.credential_check_path);
        let check = self.test_url(&check_url, ProbeMode::CredentialCheck).await;
        if !(check.is_confirmed() || check.signals_not_found()) {
            debug!("[FAIL] {}: {}", job.target, check.response);
            return JobControl::Continue;
        }

        info!("[VALID] Found credentials for {} [{}]", job.target, job.credentials);
        self.enumerate_paths(job).await
    }

    async fn enumerate_paths(&self, job: &Job) -> JobControl {
        let mut found_stream = false;

        for path in self.paths.iter().filter(|p| !paths::is_root(p)) {
            let processed = paths::replace_creds(path, &job.credentials);
            if self.state.is_path_confirmed(&job.target, &processed) {
                continue;
            }

            let url = RtspUrl::new(&job.credentials, &job.target, &processed);
            debug!("[PATH] Trying {} on {}", processed, job.target);

            let result = self.test_url(&url, ProbeMode::Stream).await;
            if result.is_confirmed() {
                if self.state.quota_reached() {
                    return JobControl::Stop;
                }
                found_stream = true;
                if !self.state.try_confirm_path(&job.target, &processed) {
                    continue;
                }
                match self.emit_finding(job, &processed, &url, &result).await {
                    HostConfirmation::Counted => {}
                    HostConfirmation::AlreadyConfirmed => {
                        info!("[STREAM] Additional stream on {}: {}", job.target, url);
                    }
                    HostConfirmation::QuotaFull => return JobControl::Stop,
                }
            } else if result.signals_not_found() {
                debug!("[PATH] Valid path format but no stream: {}", processed);
            }
        }

        if !found_stream && self.state.try_warn_host(&job.target) {
            warn!("Valid credentials for {} but no working stream path", job.target);
        }
        JobControl::Continue
    }

    /// Report the finding if this call is the first to confirm the host and
    /// the quota still has room.
    async fn emit_finding(&self, job: &Job, path: &str, url: &RtspUrl, result: &ProbeResult) -> HostConfirmation {
        let confirmation = self.state.confirm_host(&job.target);
        if confirmation != HostConfirmation::Counted {
            return confirmation;
        }

        let url = url.to_string();
        let finding = Finding {
            target: job.target.clone(),
            credentials: job.credentials.clone(),
            path: path.to_string(),
            fingerprint: fingerprint::extract(&result.response, &url).to_string(),
            url,
            discovered_at: Utc::now(),
        };

        if let Err(e) = self.reporter.report(finding, &result.response).await {
            error!("{}", e);
        }
        confirmation
    }

    /// Run one RTSP session against a URL and classify the outcome.
    /// Network failures are never retried.
    pub async fn test_url(&self, url: &RtspUrl, mode: ProbeMode) -> ProbeResult {
        let mut session = self.connector.session(self.timeout);
        let result = self.drive_session(session.as_mut(), url, mode).await;
        session.close().await;
        result
    }

    async fn drive_session(&self, session: &mut dyn RtspSession, url: &RtspUrl, mode: ProbeMode) -> ProbeResult {
        match timeout(self.timeout, session.connect(&url.scheme, url.host.as_str())).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return ProbeResult::failure(e.status_code(), format!("Connection error: {}", e)),
            Err(_) => return ProbeResult::failure(None, "Connection error: timeout".to_string()),
        }

        let description = match timeout(self.timeout, session.describe(url)).await {
            Ok(Ok(description)) => description,
            Ok(Err(e)) if e.is_unauthorized() => {
                return ProbeResult::failure(Some(401), format!("Describe error: {}", e));
            }
            Ok(Err(e)) => return ProbeResult::failure(e.status_code(), format!("No media streams: {}", e)),
            Err(_) => return ProbeResult::failure(None, "Describe timeout".to_string()),
        };

        if description.medias.is_empty() {
            return ProbeResult::failure(None, "No media streams found".to_string());
        }
        if mode == ProbeMode::CredentialCheck {
            return ProbeResult::confirmed(description.raw);
        }

        match timeout(self.timeout, session.setup_all(url, &description.medias)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return ProbeResult::failure(e.status_code(), format!("Setup error: {}", e)),
            Err(_) => return ProbeResult::failure(None, "Setup timeout".to_string()),
        }

        match timeout(self.timeout, session.play()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return ProbeResult::failure(e.status_code(), format!("Play error: {}", e)),
            Err(_) => return ProbeResult::failure(None, "Play timeout".to_string()),
        }

        tokio::select! {
            packet = session.next_packet() => match packet {
                Ok(packet) => {
                    trace!("First packet from {} on channel {} ({} bytes)", url.host, packet.channel, packet.len);
                    ProbeResult::confirmed(description.raw)
                }
                Err(e) => ProbeResult::failure(None, format!("No packets received: {}", e)),
            },
            _ = sleep(self.timeout) => ProbeResult::failure(None, "No packets received".to_string()),
        }
    }
}
