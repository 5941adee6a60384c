use crate::types::Target;
use dashmap::DashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostConfirmation {
    /// First confirmation of the host, counted towards the quota.
    Counted,
    /// Another worker got there first.
    AlreadyConfirmed,
    /// First confirmation, but the quota was already met.
    QuotaFull,
}

/// Run-wide found/attempted bookkeeping shared by every worker.
///
/// Every mutating operation is a single check-and-set on a concurrent set, so
/// "first success wins" holds under arbitrary interleaving without a lock
/// around the whole structure.
#[derive(Debug, Default)]
pub struct FoundState {
    hosts_confirmed: DashSet<Target>,
    paths_confirmed: DashSet<(Target, String)>,
    hosts_attempted: DashSet<Target>,
    hosts_warned: DashSet<Target>,
    found: AtomicUsize,
    limit: Option<usize>,
}

impl FoundState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State that stops counting findings once `limit` is reached.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0),
            ..Self::default()
        }
    }

    /// Returns true exactly once per target, on the call that confirms it and
    /// increments the found counter.
    pub fn try_confirm_host(&self, target: &Target) -> bool {
        self.confirm_host(target) == HostConfirmation::Counted
    }

    /// Mark the host confirmed and say whether this call counted it. Once the
    /// quota is full the host is still marked but no further finding is counted.
    pub fn confirm_host(&self, target: &Target) -> HostConfirmation {
        if !self.hosts_confirmed.insert(target.clone()) {
            return HostConfirmation::AlreadyConfirmed;
        }

        let counted = match self.limit {
            None => {
                self.found.fetch_add(1, Ordering::SeqCst);
                true
            }
            Some(limit) => self
                .found
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    if n < limit {
                        Some(n + 1)
                    } else {
                        None
                    }
                })
                .is_ok(),
        };

        if counted {
            HostConfirmation::Counted
        } else {
            HostConfirmation::QuotaFull
        }
    }

    pub fn is_host_confirmed(&self, target: &Target) -> bool {
        self.hosts_confirmed.contains(target)
    }

    pub fn try_confirm_path(&self, target: &Target, path: &str) -> bool {
        self.paths_confirmed.insert((target.clone(), path.to_string()))
    }

    pub fn is_path_confirmed(&self, target: &Target, path: &str) -> bool {
        self.paths_confirmed.contains(&(target.clone(), path.to_string()))
    }

    /// Returns true the first time a target is seen in this run.
    pub fn mark_attempted(&self, target: &Target) -> bool {
        self.hosts_attempted.insert(target.clone())
    }

    /// Gate for the one-time "valid credentials but no stream" advisory.
    pub fn try_warn_host(&self, target: &Target) -> bool {
        self.hosts_warned.insert(target.clone())
    }

    pub fn found_count(&self) -> usize {
        self.found.load(Ordering::SeqCst)
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn quota_reached(&self) -> bool {
        match self.limit {
            Some(limit) => self.found_count() >= limit,
            None => false,
        }
    }
}
