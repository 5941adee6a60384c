use crate::config::Config;
use crate::discovery::PortProber;
use crate::probe::{JobQueue, ProbeEngine};
use crate::reporting::Reporter;
use crate::rtsp::Connector;
use crate::store::FoundState;
use crate::types::{Credentials, Finding, Job, Target};
use crate::Result;
use futures::future::join_all;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub targets: usize,
    pub jobs: usize,
    pub found: usize,
    pub findings: Vec<Finding>,
    pub elapsed: Duration,
}

/// Owns the run: target dedup, the optional port pre-filter, the worker pool
/// and the job producer.
pub struct Scanner {
    config: Config,
    state: Arc<FoundState>,
    engine: Arc<ProbeEngine>,
    reporter: Arc<Reporter>,
}

impl Scanner {
    pub fn new(config: Config, connector: Arc<dyn Connector>, reporter: Arc<Reporter>) -> Self {
        let state = Arc::new(FoundState::with_limit(config.finding_limit()));
        let engine = Arc::new(ProbeEngine::new(
            connector,
            Arc::clone(&state),
            Arc::clone(&reporter),
            &config,
        ));

        Self {
            config,
            state,
            engine,
            reporter,
        }
    }

    pub fn state(&self) -> Arc<FoundState> {
        Arc::clone(&self.state)
    }

    pub async fn run(&self, targets: Vec<Target>, usernames: &[String], passwords: &[String]) -> Result<ScanSummary> {
        let start = Instant::now();

        let mut targets: Vec<Target> = targets
            .into_iter()
            .filter(|target| self.state.mark_attempted(target))
            .collect();

        if self.config.scan.port_probe {
            info!("Checking the RTSP port on {} hosts", targets.len());
            targets = PortProber::from_config(&self.config).filter_open(targets).await;
        }

        let jobs = self.dispatch(&targets, usernames, passwords).await;

        Ok(ScanSummary {
            targets: targets.len(),
            jobs,
            found: self.state.found_count(),
            findings: self.reporter.findings(),
            elapsed: start.elapsed(),
        })
    }

    /// Feed every (username, password, target) triple through a bounded queue.
    /// Enumeration is user-major so each host sees one credential before the next.
    async fn dispatch(&self, targets: &[Target], usernames: &[String], passwords: &[String]) -> usize {
        if targets.is_empty() || usernames.is_empty() || passwords.is_empty() {
            return 0;
        }

        let workers = self.config.worker_count();
        let (tx, rx) = mpsc::channel::<Job>(1);
        let queue: JobQueue = Arc::new(Mutex::new(rx));

        debug!("Starting {} workers", workers);
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let engine = Arc::clone(&self.engine);
                let queue = Arc::clone(&queue);
                tokio::spawn(async move { engine.run_worker(queue).await })
            })
            .collect();
        drop(queue);

        let mut sent = 0;
        'producer: for username in usernames {
            for password in passwords {
                for target in targets {
                    if self.state.quota_reached() {
                        info!("Finding limit reached, stopping job production");
                        break 'producer;
                    }

                    let job = Job::root(target.clone(), Credentials::new(username.clone(), password.clone()));
                    if tx.send(job).await.is_err() {
                        break 'producer;
                    }
                    sent += 1;
                }
            }
        }
        drop(tx);

        for result in join_all(handles).await {
            if let Err(e) = result {
                error!("Worker task failed: {}", e);
            }
        }

        debug!("Dispatched {} jobs", sent);
        sent
    }
}
