use std::collections::HashSet;

use crate::election::{ElectionError, ElectionResult};
use crate::types::Address;

/// One-vote-per-address ledger
#[derive(Debug, Clone, Default)]
pub struct BallotBox {
    voters: HashSet<Address>,
    total_votes: u64,
}

impl BallotBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.voters.contains(voter)
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn ensure_can_vote(&self, voter: &Address) -> ElectionResult<()> {
        if self.has_voted(voter) {
            return Err(ElectionError::AlreadyVoted(*voter));
        }
        Ok(())
    }

    /// Record a ballot and return the new total.
    /// Callers must have checked `ensure_can_vote`.
    pub(crate) fn record(&mut self, voter: Address) -> u64 {
        let inserted = self.voters.insert(voter);
        debug_assert!(inserted, "voter {} recorded twice", voter);
        self.total_votes += 1;
        self.total_votes
    }
}
