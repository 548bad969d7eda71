use std::collections::BTreeMap;
use std::sync::Arc;

use metrics::{counter, gauge};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::election::{ElectionError, ElectionEvent};

/// Running totals mirrored from what is reported to the `metrics` facade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionStats {
    pub contenders_registered: u64,
    pub sessions_started: u64,
    pub sessions_ended: u64,
    pub votes_cast: u64,
    pub winners_declared: u64,
    /// Last reported running vote total
    pub total_votes: u64,
    /// Rejections keyed by error kind
    pub rejected: BTreeMap<String, u64>,
}

impl ElectionStats {
    pub fn total_rejected(&self) -> u64 {
        self.rejected.values().sum()
    }
}

/// Records election metrics through the `metrics` facade.
///
/// Local totals are always kept and can be read back with `stats()`; the
/// facade is only fed when `enabled` is set.
#[derive(Debug, Clone)]
pub struct ElectionMetrics {
    enabled: bool,
    stats: Arc<RwLock<ElectionStats>>,
}

impl ElectionMetrics {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            stats: Arc::new(RwLock::new(ElectionStats::default())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current totals
    pub fn stats(&self) -> ElectionStats {
        self.stats.read().clone()
    }

    /// Record a committed notification
    pub fn record_event(&self, event: &ElectionEvent) {
        let mut stats = self.stats.write();
        match event {
            ElectionEvent::ContenderRegistered { .. } => {
                stats.contenders_registered += 1;
                if self.enabled {
                    counter!("election.contenders_registered", 1);
                }
            }
            ElectionEvent::VotingStarted { .. } => {
                stats.sessions_started += 1;
                if self.enabled {
                    counter!("election.sessions_started", 1);
                }
            }
            ElectionEvent::VotingEnded { .. } => {
                stats.sessions_ended += 1;
                if self.enabled {
                    counter!("election.sessions_ended", 1);
                }
            }
            ElectionEvent::VoteCast { total_votes, .. } => {
                stats.votes_cast += 1;
                stats.total_votes = *total_votes;
                if self.enabled {
                    counter!("election.votes_cast", 1);
                    gauge!("election.total_votes", *total_votes as f64);
                }
            }
            ElectionEvent::WinnerDeclared { .. } => {
                stats.winners_declared += 1;
                if self.enabled {
                    counter!("election.winners_declared", 1);
                }
            }
        }
    }

    /// Record a rejected operation
    pub fn record_rejection(&self, error: &ElectionError) {
        *self
            .stats
            .write()
            .rejected
            .entry(error.kind().to_string())
            .or_insert(0) += 1;
        if self.enabled {
            counter!("election.rejected", 1, "kind" => error.kind());
        }
    }
}
