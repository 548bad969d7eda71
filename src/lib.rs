#[cfg(not(feature = "std"))]
compile_error!("voting-engine requires the `std` feature");

pub mod clock;
pub mod config;
pub mod election;
pub mod metrics;
pub mod telemetry;
pub mod types;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::ElectionConfig;
pub use metrics::{ElectionMetrics, ElectionStats};
pub use election::{
    Contender, Election, ElectionError, ElectionEvent, ElectionService, ElectionSnapshot,
    EventRecord, SessionPhase, VotingStatus, Winner,
};
pub use types::{Address, ContenderCode, ElectionId, Timestamp};

// Core types
pub type Result<T> = std::result::Result<T, Error>;
pub use error::Error;

pub mod error;
