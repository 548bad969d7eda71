use std::fmt;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::election::{ElectionError, ElectionResult};
use crate::types::Timestamp;

/// Minimum number of contenders needed to open a session
pub const MIN_CONTENDERS: usize = 2;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode, TypeInfo)]
pub enum SessionPhase {
    Idle,
    Active,
    Ended,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Active => write!(f, "active"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Read-only view of the session window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingStatus {
    pub active: bool,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Idle → Active → Ended state machine over a time window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionController {
    phase: SessionPhase,
    start: Timestamp,
    end: Timestamp,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            start: 0,
            end: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    pub fn start_time(&self) -> Timestamp {
        self.start
    }

    pub fn end_time(&self) -> Timestamp {
        self.end
    }

    pub fn status(&self) -> VotingStatus {
        VotingStatus {
            active: self.is_active(),
            start: self.start,
            end: self.end,
        }
    }

    /// Active and past its deadline
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.is_active() && now >= self.end
    }

    /// Seconds left in an active session
    pub fn time_remaining(&self, now: Timestamp) -> u64 {
        if self.is_active() {
            self.end.saturating_sub(now)
        } else {
            0
        }
    }

    pub fn ensure_idle(&self) -> ElectionResult<()> {
        match self.phase {
            SessionPhase::Idle => Ok(()),
            phase => Err(ElectionError::SessionNotIdle { phase }),
        }
    }

    /// Compute the window a new session would get, without opening it
    pub fn plan_start(
        &self,
        now: Timestamp,
        duration_secs: u64,
        contenders: usize,
    ) -> ElectionResult<(Timestamp, Timestamp)> {
        match self.phase {
            SessionPhase::Idle => {}
            SessionPhase::Active => return Err(ElectionError::SessionActive),
            SessionPhase::Ended => return Err(ElectionError::SessionNotIdle { phase: self.phase }),
        }
        if contenders < MIN_CONTENDERS {
            return Err(ElectionError::InsufficientContenders {
                required: MIN_CONTENDERS,
                registered: contenders,
            });
        }
        if duration_secs == 0 {
            return Err(ElectionError::InvalidDuration(duration_secs));
        }
        let end = now
            .checked_add(duration_secs)
            .ok_or(ElectionError::InvalidDuration(duration_secs))?;
        Ok((now, end))
    }

    /// Open the session over a window from `plan_start`
    pub(crate) fn open(&mut self, start: Timestamp, end: Timestamp) {
        debug_assert!(start < end);
        self.phase = SessionPhase::Active;
        self.start = start;
        self.end = end;
    }

    /// Close an active session
    pub(crate) fn close(&mut self) {
        debug_assert!(self.is_active());
        self.phase = SessionPhase::Ended;
    }
}
