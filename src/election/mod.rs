/*!
# Election Module

The election aggregate and the components it is built from.

## Components

- **AccessControl** (`access`): the single owner identity, gating registration
  and session control.
- **ContenderRegistry** (`registry`): up to three contenders, unique by code and
  by address.
- **SessionController** (`session`): the Idle → Active → Ended phase machine
  over a `[start, end)` window.
- **BallotBox** (`ballot`): one vote per address and the running total.
- **WinnerResolver** (`winner`): earliest-registrant-wins-ties leader scan.
- **ElectionService** (`service`): serialized, thread-safe front door with
  notification fan-out and history.

## Execution model

Every operation on `Election` validates first and commits last, so a rejected
call leaves the aggregate unchanged. The one exception is the lazy close of an
expired session: when `vote` observes `now >= end` on an active session it
closes the session (emitting `VotingEnded`) and then rejects the ballot, and
the close is kept.

Time is read from a `Clock` at the top of each operation; nothing runs in the
background.

Committed transitions queue `ElectionEvent`s inside the aggregate. Drain them
with `take_events` after each operation, or use `ElectionService`, which does
it for you.

```rust
use std::sync::Arc;
use voting_engine::clock::ManualClock;
use voting_engine::election::{Election, SessionPhase};
use voting_engine::types::Address;

# fn main() {
let owner = Address::from_low_u64_be(1);
let clock = ManualClock::new(1_000);
let mut election = Election::new(owner, Arc::new(clock.clone()));

election.register_one(owner, Address::from_low_u64_be(10), "ALICE").unwrap();
election.register_one(owner, Address::from_low_u64_be(11), "BOB").unwrap();
election.start_voting(owner, 3600).unwrap();

election.vote(Address::from_low_u64_be(100), "ALICE").unwrap();
assert_eq!(election.get_total_votes(), 1);
assert_eq!(election.take_events().len(), 4);

clock.advance(3600);
election.end_voting(Address::from_low_u64_be(100)).unwrap();
assert_eq!(election.phase(), SessionPhase::Ended);
assert_eq!(election.get_winner().unwrap().code.as_str(), "ALICE");
assert_eq!(election.take_events().len(), 1);
# }
```
*/

pub mod access;
pub mod ballot;
pub mod error;
pub mod events;
pub mod registry;
pub mod service;
pub mod session;
pub mod snapshot;
pub mod winner;

pub use access::AccessControl;
pub use ballot::BallotBox;
pub use error::ElectionError;
pub use events::{ElectionEvent, EventRecord};
pub use registry::{Contender, ContenderRegistry, MAX_CONTENDERS};
pub use service::ElectionService;
pub use session::{SessionController, SessionPhase, VotingStatus, MIN_CONTENDERS};
pub use snapshot::ElectionSnapshot;
pub use winner::{Winner, WinnerResolver};

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::types::{Address, ContenderCode, ElectionId, Timestamp};

/// Result of an election operation
pub type ElectionResult<T> = std::result::Result<T, ElectionError>;

/// Election aggregate root
pub struct Election {
    id: ElectionId,
    access: AccessControl,
    registry: ContenderRegistry,
    session: SessionController,
    ballots: BallotBox,
    clock: Arc<dyn Clock>,
    pending: Vec<ElectionEvent>,
}

impl fmt::Debug for Election {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Election")
            .field("id", &self.id)
            .field("owner", &self.access.owner())
            .field("phase", &self.session.phase())
            .field("contenders", &self.registry.len())
            .field("total_votes", &self.ballots.total_votes())
            .finish()
    }
}

impl Election {
    /// Create an idle election owned by `owner`
    pub fn new(owner: Address, clock: Arc<dyn Clock>) -> Self {
        let id = ElectionId::new();
        info!(election_id = %id, %owner, "Election created");
        Self {
            id,
            access: AccessControl::new(owner),
            registry: ContenderRegistry::new(),
            session: SessionController::new(),
            ballots: BallotBox::new(),
            clock,
            pending: Vec::new(),
        }
    }

    /// Create an election reading the system clock
    pub fn with_system_clock(owner: Address) -> Self {
        Self::new(owner, Arc::new(SystemClock))
    }

    pub fn id(&self) -> ElectionId {
        self.id
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        self.access.is_owner(caller)
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Register a single contender
    pub fn register_one(
        &mut self,
        caller: Address,
        address: Address,
        code: impl Into<ContenderCode>,
    ) -> ElectionResult<Contender> {
        let code = code.into();
        let checked = self
            .access
            .ensure_owner(&caller)
            .and_then(|_| self.registry.validate_entry(&address, &code))
            .and_then(|_| self.session.ensure_idle());
        if let Err(err) = checked {
            return Err(self.rejected("register_one", &caller, err));
        }

        let now = self.clock.now();
        let contender = self.registry.insert(address, code, now).clone();
        info!(
            election_id = %self.id,
            address = %contender.address,
            code = %contender.code,
            "Contender registered"
        );
        self.emit(ElectionEvent::ContenderRegistered {
            address: contender.address,
            code: contender.code.clone(),
            registered_at: now,
        });
        Ok(contender)
    }

    /// Register a full slate of contenders on an empty registry, all or nothing
    pub fn register_batch<C: Into<ContenderCode>>(
        &mut self,
        caller: Address,
        addresses: [Address; MAX_CONTENDERS],
        codes: [C; MAX_CONTENDERS],
    ) -> ElectionResult<Vec<Contender>> {
        let entries: Vec<(Address, ContenderCode)> = addresses
            .into_iter()
            .zip(codes.into_iter().map(Into::into))
            .collect();

        let checked = self
            .access
            .ensure_owner(&caller)
            .and_then(|_| self.session.ensure_idle())
            .and_then(|_| self.registry.validate_batch(&entries));
        if let Err(err) = checked {
            return Err(self.rejected("register_batch", &caller, err));
        }

        let now = self.clock.now();
        let mut registered = Vec::with_capacity(entries.len());
        for (address, code) in entries {
            let contender = self.registry.insert(address, code, now).clone();
            self.emit(ElectionEvent::ContenderRegistered {
                address: contender.address,
                code: contender.code.clone(),
                registered_at: now,
            });
            registered.push(contender);
        }
        info!(election_id = %self.id, count = registered.len(), "Contender batch registered");
        Ok(registered)
    }

    /// Open the voting window for `duration_secs`
    pub fn start_voting(&mut self, caller: Address, duration_secs: u64) -> ElectionResult<VotingStatus> {
        let now = self.clock.now();
        let planned = self
            .access
            .ensure_owner(&caller)
            .and_then(|_| self.session.plan_start(now, duration_secs, self.registry.len()));
        let (start, end) = match planned {
            Ok(window) => window,
            Err(err) => return Err(self.rejected("start_voting", &caller, err)),
        };

        self.session.open(start, end);
        info!(election_id = %self.id, start, end, "Voting started");
        self.emit(ElectionEvent::VotingStarted { start, end });
        Ok(self.session.status())
    }

    /// Close the voting window. Only the owner may close it before the
    /// deadline; once the deadline has passed anyone may.
    pub fn end_voting(&mut self, caller: Address) -> ElectionResult<Timestamp> {
        let now = self.clock.now();
        if !self.session.is_active() {
            let err = ElectionError::SessionNotActive { phase: self.session.phase() };
            return Err(self.rejected("end_voting", &caller, err));
        }
        if now < self.session.end_time() {
            if let Err(err) = self.access.ensure_owner_for(&caller, "end voting before deadline") {
                return Err(self.rejected("end_voting", &caller, err));
            }
        }

        self.close_session(now);
        Ok(now)
    }

    /// Cast `caller`'s single ballot for the contender behind `code`
    pub fn vote(&mut self, caller: Address, code: &str) -> ElectionResult<u64> {
        let now = self.clock.now();
        if self.session.is_expired(now) {
            self.close_session(now);
            return Err(self.rejected("vote", &caller, ElectionError::VotingEnded { ended_at: now }));
        }

        let contender = self
            .ensure_voting_open()
            .and_then(|_| self.ballots.ensure_can_vote(&caller))
            .and_then(|_| {
                self.registry
                    .get(code)
                    .map(|c| (c.address, c.code.clone()))
                    .ok_or_else(|| ElectionError::InvalidCode(code.to_string()))
            });
        let (contender, code) = match contender {
            Ok(found) => found,
            Err(err) => return Err(self.rejected("vote", &caller, err)),
        };

        let total_votes = self.ballots.record(caller);
        self.registry.record_vote(code.as_str());
        debug_assert_eq!(self.registry.tally_sum(), total_votes);

        debug!(election_id = %self.id, voter = %caller, %code, total_votes, "Vote cast");
        self.emit(ElectionEvent::VoteCast {
            voter: caller,
            contender,
            code,
            total_votes,
        });
        Ok(total_votes)
    }

    pub fn get_contender(&self, code: &str) -> ElectionResult<Contender> {
        self.registry.lookup(code).cloned()
    }

    /// Registered addresses in registration order
    pub fn get_all_contenders(&self) -> Vec<Address> {
        self.registry.addresses()
    }

    pub fn contenders(&self) -> &[Contender] {
        self.registry.contenders()
    }

    pub fn contender_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_registered(&self, address: &Address) -> bool {
        self.registry.is_registered(address)
    }

    pub fn code_to_address(&self, code: &str) -> Option<Address> {
        self.registry.code_to_address(code)
    }

    pub fn get_total_votes(&self) -> u64 {
        self.ballots.total_votes()
    }

    pub fn has_voted(&self, address: &Address) -> bool {
        self.ballots.has_voted(address)
    }

    pub fn get_voting_status(&self) -> VotingStatus {
        self.session.status()
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn voting_active(&self) -> bool {
        self.session.is_active()
    }

    /// Seconds left before the deadline of an active session
    pub fn time_remaining(&self) -> u64 {
        self.session.time_remaining(self.clock.now())
    }

    /// Leading contender of an ended session
    pub fn get_winner(&self) -> ElectionResult<Winner> {
        if self.session.phase() != SessionPhase::Ended {
            return Err(ElectionError::SessionActive);
        }
        self.resolve_winner()
    }

    /// Same as `get_winner`, additionally emitting `WinnerDeclared`
    pub fn declare_winner(&mut self) -> ElectionResult<Winner> {
        if self.session.phase() != SessionPhase::Ended {
            return Err(ElectionError::SessionNotEnded);
        }
        let winner = self.resolve_winner()?;
        info!(
            election_id = %self.id,
            winner = %winner.address,
            code = %winner.code,
            vote_count = winner.vote_count,
            "Winner declared"
        );
        self.emit(ElectionEvent::WinnerDeclared {
            winner: winner.address,
            code: winner.code.clone(),
            vote_count: winner.vote_count,
        });
        Ok(winner)
    }

    /// Point-in-time read model of the whole election
    pub fn snapshot(&self) -> ElectionSnapshot {
        let now = self.clock.now();
        ElectionSnapshot {
            election_id: self.id,
            owner: self.access.owner(),
            phase: self.session.phase(),
            status: self.session.status(),
            time_remaining: self.session.time_remaining(now),
            contenders: self.registry.contenders().to_vec(),
            total_votes: self.ballots.total_votes(),
            voter_count: self.ballots.voter_count(),
            winner: self.get_winner().ok(),
            taken_at: now,
        }
    }

    /// Drain notifications emitted since the last call, in emission order.
    ///
    /// Events queue up inside the aggregate until drained, so a caller
    /// driving `Election` directly must call this after each operation.
    /// `ElectionService` does so under its lock.
    pub fn take_events(&mut self) -> Vec<ElectionEvent> {
        std::mem::take(&mut self.pending)
    }

    fn ensure_voting_open(&self) -> ElectionResult<()> {
        if self.session.is_active() {
            Ok(())
        } else {
            Err(ElectionError::VotingNotActive)
        }
    }

    fn resolve_winner(&self) -> ElectionResult<Winner> {
        WinnerResolver::resolve(self.registry.contenders())
            .ok_or_else(|| ElectionError::NotFound("no contenders registered".into()))
    }

    fn close_session(&mut self, now: Timestamp) {
        self.session.close();
        info!(
            election_id = %self.id,
            ended_at = now,
            deadline = self.session.end_time(),
            total_votes = self.ballots.total_votes(),
            "Voting ended"
        );
        self.emit(ElectionEvent::VotingEnded { ended_at: now });
    }

    fn emit(&mut self, event: ElectionEvent) {
        self.pending.push(event);
    }

    fn rejected(&self, operation: &'static str, caller: &Address, err: ElectionError) -> ElectionError {
        warn!(
            election_id = %self.id,
            operation,
            %caller,
            kind = err.kind(),
            "Operation rejected: {}",
            err
        );
        err
    }
}
