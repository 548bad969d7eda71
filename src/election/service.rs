/*!
# Election Service

Thread-safe front door over one `Election`. The aggregate sits behind a
single `parking_lot::Mutex`, so operations from any number of threads or
tasks run one at a time and each completes (or is rejected) before the next
starts. The lock is never held across an `.await`.

After every operation the events the aggregate emitted are stamped with a
sequence number, appended to the bounded history and broadcast to
subscribers, all while still holding the lock so subscribers observe events
in commit order.

```rust
use std::sync::Arc;
use voting_engine::clock::ManualClock;
use voting_engine::config::ElectionConfig;
use voting_engine::election::ElectionService;
use voting_engine::types::Address;

# fn main() {
let owner = Address::from_low_u64_be(1);
let service = ElectionService::new(owner, Arc::new(ManualClock::new(0)), ElectionConfig::default()).unwrap();
let mut events = service.subscribe();

service.register_one(owner, Address::from_low_u64_be(10), "ALICE").unwrap();
assert_eq!(events.try_recv().unwrap().event.name(), "ContenderRegistered");
assert_eq!(service.history().len(), 1);
# }
```
*/

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::ElectionConfig;
use crate::election::{
    Contender, Election, ElectionEvent, ElectionResult, ElectionSnapshot, EventRecord,
    SessionPhase, VotingStatus, Winner, MAX_CONTENDERS,
};
use crate::metrics::{ElectionMetrics, ElectionStats};
use crate::types::{Address, ContenderCode, ElectionId, Timestamp};
use crate::{Error, Result};

struct ServiceState {
    election: Election,
    history: VecDeque<EventRecord>,
    next_seq: u64,
}

/// Serialized, observable election
pub struct ElectionService {
    id: ElectionId,
    state: Mutex<ServiceState>,
    events: broadcast::Sender<EventRecord>,
    config: ElectionConfig,
    metrics: ElectionMetrics,
}

impl ElectionService {
    /// Create a service around a fresh election owned by `owner`
    pub fn new(owner: Address, clock: Arc<dyn Clock>, config: ElectionConfig) -> Result<Self> {
        Self::from_election(Election::new(owner, clock), config)
    }

    /// Wrap an existing election
    pub fn from_election(election: Election, config: ElectionConfig) -> Result<Self> {
        config.validate().map_err(Error::Config)?;
        let (events, _) = broadcast::channel(config.event_capacity);
        let id = election.id();
        info!(election_id = %id, ?config, "Election service started");
        Ok(Self {
            id,
            state: Mutex::new(ServiceState {
                election,
                history: VecDeque::new(),
                next_seq: 0,
            }),
            events,
            metrics: ElectionMetrics::new(config.enable_metrics),
            config,
        })
    }

    pub fn id(&self) -> ElectionId {
        self.id
    }

    pub fn config(&self) -> &ElectionConfig {
        &self.config
    }

    /// Totals of committed events and rejections
    pub fn metrics(&self) -> ElectionStats {
        self.metrics.stats()
    }

    /// Receive every event committed from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventRecord> {
        self.events.subscribe()
    }

    /// Retained event records, oldest first.
    ///
    /// Only the most recent `history_limit` records are kept; older ones are
    /// evicted, so the first `seq` returned may be greater than zero.
    pub fn history(&self) -> Vec<EventRecord> {
        self.state.lock().history.iter().cloned().collect()
    }

    /// Retained records with `seq >= from`. Records already evicted from the
    /// history are not returned; compare the first `seq` with `from` to
    /// detect the gap.
    pub fn history_since(&self, from: u64) -> Vec<EventRecord> {
        self.state
            .lock()
            .history
            .iter()
            .filter(|record| record.seq >= from)
            .cloned()
            .collect()
    }

    pub fn register_one(
        &self,
        caller: Address,
        address: Address,
        code: impl Into<ContenderCode>,
    ) -> ElectionResult<Contender> {
        let code = code.into();
        self.execute(|election| election.register_one(caller, address, code))
    }

    pub fn register_batch<C: Into<ContenderCode>>(
        &self,
        caller: Address,
        addresses: [Address; MAX_CONTENDERS],
        codes: [C; MAX_CONTENDERS],
    ) -> ElectionResult<Vec<Contender>> {
        self.execute(|election| election.register_batch(caller, addresses, codes))
    }

    pub fn start_voting(&self, caller: Address, duration_secs: u64) -> ElectionResult<VotingStatus> {
        self.execute(|election| election.start_voting(caller, duration_secs))
    }

    pub fn end_voting(&self, caller: Address) -> ElectionResult<Timestamp> {
        self.execute(|election| election.end_voting(caller))
    }

    pub fn vote(&self, caller: Address, code: &str) -> ElectionResult<u64> {
        self.execute(|election| election.vote(caller, code))
    }

    pub fn declare_winner(&self) -> ElectionResult<Winner> {
        self.execute(|election| election.declare_winner())
    }

    pub fn get_contender(&self, code: &str) -> ElectionResult<Contender> {
        self.read(|election| election.get_contender(code))
    }

    pub fn get_all_contenders(&self) -> Vec<Address> {
        self.read(|election| election.get_all_contenders())
    }

    pub fn get_total_votes(&self) -> u64 {
        self.read(|election| election.get_total_votes())
    }

    pub fn has_voted(&self, address: &Address) -> bool {
        self.read(|election| election.has_voted(address))
    }

    pub fn get_voting_status(&self) -> VotingStatus {
        self.read(|election| election.get_voting_status())
    }

    pub fn get_winner(&self) -> ElectionResult<Winner> {
        self.read(|election| election.get_winner())
    }

    pub fn phase(&self) -> SessionPhase {
        self.read(|election| election.phase())
    }

    pub fn owner(&self) -> Address {
        self.read(|election| election.owner())
    }

    pub fn snapshot(&self) -> ElectionSnapshot {
        self.read(|election| election.snapshot())
    }

    /// Run a read-only query under the lock
    pub fn read<T>(&self, query: impl FnOnce(&Election) -> T) -> T {
        let state = self.state.lock();
        query(&state.election)
    }

    fn execute<T>(&self, operation: impl FnOnce(&mut Election) -> ElectionResult<T>) -> ElectionResult<T> {
        let mut state = self.state.lock();
        let result = operation(&mut state.election);

        // Committed events are published even when the operation itself was
        // rejected (a vote that closes an expired session).
        for event in state.election.take_events() {
            self.metrics.record_event(&event);
            let record = self.append(&mut state, event);
            if self.events.send(record).is_err() {
                debug!(election_id = %self.id, "No subscribers for election event");
            }
        }

        if let Err(err) = &result {
            self.metrics.record_rejection(err);
        }
        result
    }

    fn append(&self, state: &mut ServiceState, event: ElectionEvent) -> EventRecord {
        let record = EventRecord {
            seq: state.next_seq,
            election_id: self.id,
            event,
        };
        state.next_seq += 1;
        if state.history.len() >= self.config.history_limit {
            state.history.pop_front();
        }
        state.history.push_back(record.clone());
        record
    }
}
