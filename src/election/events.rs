/*!
# Election Events

Notifications emitted by committed transitions. Consumers (UI refresh,
transaction history, indexers) receive them as `EventRecord`s carrying a
per-election sequence number.

Records travel either as JSON through serde or SCALE-encoded for indexers:

```rust
use voting_engine::election::{ElectionEvent, EventRecord};
use voting_engine::types::ElectionId;

# fn main() {
let record = EventRecord {
    seq: 0,
    election_id: ElectionId::new(),
    event: ElectionEvent::VotingStarted { start: 100, end: 160 },
};
let bytes = record.encode();
assert_eq!(EventRecord::decode(&bytes).unwrap(), record);
# }
```
*/

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Address, ContenderCode, ElectionId, Timestamp};
use crate::Result;

/// Observable election notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(tag = "type")]
pub enum ElectionEvent {
    ContenderRegistered {
        address: Address,
        code: ContenderCode,
        registered_at: Timestamp,
    },
    VotingStarted {
        start: Timestamp,
        end: Timestamp,
    },
    VotingEnded {
        ended_at: Timestamp,
    },
    VoteCast {
        voter: Address,
        contender: Address,
        code: ContenderCode,
        total_votes: u64,
    },
    WinnerDeclared {
        winner: Address,
        code: ContenderCode,
        vote_count: u64,
    },
}

impl ElectionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContenderRegistered { .. } => "ContenderRegistered",
            Self::VotingStarted { .. } => "VotingStarted",
            Self::VotingEnded { .. } => "VotingEnded",
            Self::VoteCast { .. } => "VoteCast",
            Self::WinnerDeclared { .. } => "WinnerDeclared",
        }
    }
}

/// Sequenced event as published to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub seq: u64,
    pub election_id: ElectionId,
    pub event: ElectionEvent,
}

impl EventRecord {
    /// SCALE-encode the record
    pub fn encode(&self) -> Vec<u8> {
        (self.seq, self.election_id.as_uuid().as_bytes(), &self.event).encode()
    }

    /// Decode a SCALE-encoded record
    pub fn decode(mut bytes: &[u8]) -> Result<Self> {
        let (seq, id, event) = <(u64, [u8; 16], ElectionEvent)>::decode(&mut bytes)?;
        Ok(Self {
            seq,
            election_id: ElectionId::from_uuid(Uuid::from_bytes(id)),
            event,
        })
    }
}
