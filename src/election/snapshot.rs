use serde::{Deserialize, Serialize};

use crate::election::{Contender, SessionPhase, VotingStatus, Winner};
use crate::types::{Address, ElectionId, Timestamp};

/// Read model polled by front-ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSnapshot {
    pub election_id: ElectionId,
    pub owner: Address,
    pub phase: SessionPhase,
    pub status: VotingStatus,
    pub time_remaining: u64,
    pub contenders: Vec<Contender>,
    pub total_votes: u64,
    pub voter_count: usize,
    /// Present once the session has ended
    pub winner: Option<Winner>,
    pub taken_at: Timestamp,
}

impl ElectionSnapshot {
    /// Share of the total for each contender, in basis points.
    /// All zero while no votes have been cast.
    pub fn vote_shares_bps(&self) -> Vec<(Address, u64)> {
        self.contenders
            .iter()
            .map(|c| {
                let share = if self.total_votes == 0 {
                    0
                } else {
                    c.vote_count * 10_000 / self.total_votes
                };
                (c.address, share)
            })
            .collect()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
