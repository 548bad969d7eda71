/*!
# Election Error Module

One variant per violated rule. Every failure is a rejected operation: the
aggregate is left exactly as it was before the call (the lazy auto-end of an
expired session being the one transition that survives a rejected vote).

`ElectionError::kind` returns the canonical identifier for each rule, which is
what callers and test-suites should match on rather than the display text.
*/

use thiserror::Error;

use crate::election::SessionPhase;
use crate::types::{Address, ContenderCode, Timestamp};

/// Election operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElectionError {
    #[error("Only owner can {action} (caller {caller})")]
    Unauthorized { caller: Address, action: &'static str },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Code already exists: {0}")]
    DuplicateCode(ContenderCode),

    #[error("Contender already registered: {0}")]
    DuplicateAddress(Address),

    #[error("Contenders already registered ({count} present)")]
    AlreadyRegistered { count: usize },

    #[error("Maximum contenders reached ({max})")]
    CapacityExceeded { max: usize },

    #[error("Session is not idle (session is {phase})")]
    SessionNotIdle { phase: SessionPhase },

    #[error("Voting is still active")]
    SessionActive,

    #[error("Voting session is not active (session is {phase})")]
    SessionNotActive { phase: SessionPhase },

    #[error("Voting must be ended first")]
    SessionNotEnded,

    #[error("Need at least {required} contenders to start voting, have {registered}")]
    InsufficientContenders { required: usize, registered: usize },

    #[error("Invalid voting duration: {0}s")]
    InvalidDuration(u64),

    #[error("Voting is not active")]
    VotingNotActive,

    #[error("Voting has ended at {ended_at}")]
    VotingEnded { ended_at: Timestamp },

    #[error("User already voted: {0}")]
    AlreadyVoted(Address),

    #[error("Invalid contender code: {0}")]
    InvalidCode(String),

    #[error("Contender not found: {0}")]
    NotFound(String),
}

impl ElectionError {
    /// Canonical identifier of the violated rule
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "Unauthorized",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::DuplicateCode(_) => "DuplicateCode",
            Self::DuplicateAddress(_) => "DuplicateAddress",
            Self::AlreadyRegistered { .. } => "AlreadyRegistered",
            Self::CapacityExceeded { .. } => "CapacityExceeded",
            Self::SessionNotIdle { .. } => "SessionNotIdle",
            Self::SessionActive => "SessionActive",
            Self::SessionNotActive { .. } => "SessionNotActive",
            Self::SessionNotEnded => "SessionNotEnded",
            Self::InsufficientContenders { .. } => "InsufficientContenders",
            Self::InvalidDuration(_) => "InvalidDuration",
            Self::VotingNotActive => "VotingNotActive",
            Self::VotingEnded { .. } => "VotingEnded",
            Self::AlreadyVoted(_) => "AlreadyVoted",
            Self::InvalidCode(_) => "InvalidCode",
            Self::NotFound(_) => "NotFound",
        }
    }

    /// Whether the same call may succeed later without any other change.
    /// Only waiting for a session to open or close qualifies.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::VotingNotActive | Self::SessionActive | Self::SessionNotEnded)
    }
}
