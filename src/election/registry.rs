/*!
# Contender Registry

Fixed-capacity, ordered set of contenders. Two indexes back the uniqueness
rules: code → address and address → slot. Both are private and only change
through `insert`, so a code always resolves to exactly one registered
contender and an address occupies at most one slot.

Validation (`validate_entry`, `validate_batch`) is separated from the commit
(`insert`) so callers can check everything, including rules owned by other
components, before touching any state.
*/

use std::collections::{HashMap, HashSet};

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::election::{ElectionError, ElectionResult};
use crate::types::{Address, ContenderCode, Timestamp};

/// Maximum number of contenders in an election
pub const MAX_CONTENDERS: usize = 3;

/// Registered contender and its running tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
pub struct Contender {
    pub address: Address,
    pub code: ContenderCode,
    pub vote_count: u64,
    pub registered: bool,
    pub registered_at: Timestamp,
}

/// Ordered contender set with code and address indexes
#[derive(Debug, Clone, Default)]
pub struct ContenderRegistry {
    contenders: Vec<Contender>,
    code_index: HashMap<ContenderCode, Address>,
    address_index: HashMap<Address, usize>,
}

impl ContenderRegistry {
    pub fn new() -> Self {
        Self {
            contenders: Vec::with_capacity(MAX_CONTENDERS),
            code_index: HashMap::with_capacity(MAX_CONTENDERS),
            address_index: HashMap::with_capacity(MAX_CONTENDERS),
        }
    }

    pub fn len(&self) -> usize {
        self.contenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contenders.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.contenders.len() >= MAX_CONTENDERS
    }

    /// Check a single registration against current state
    pub fn validate_entry(&self, address: &Address, code: &ContenderCode) -> ElectionResult<()> {
        validate_arguments(address, code)?;
        if self.code_index.contains_key(code) {
            return Err(ElectionError::DuplicateCode(code.clone()));
        }
        if self.address_index.contains_key(address) {
            return Err(ElectionError::DuplicateAddress(*address));
        }
        if self.is_full() {
            return Err(ElectionError::CapacityExceeded { max: MAX_CONTENDERS });
        }
        Ok(())
    }

    /// Check a whole batch, including duplicates between its own slots.
    /// Batches are only accepted on an empty registry.
    pub fn validate_batch(&self, entries: &[(Address, ContenderCode)]) -> ElectionResult<()> {
        if !self.is_empty() {
            return Err(ElectionError::AlreadyRegistered { count: self.len() });
        }
        if entries.len() > MAX_CONTENDERS {
            return Err(ElectionError::CapacityExceeded { max: MAX_CONTENDERS });
        }

        let mut codes: HashSet<&ContenderCode> = HashSet::with_capacity(entries.len());
        let mut addresses: HashSet<&Address> = HashSet::with_capacity(entries.len());
        for (address, code) in entries {
            validate_arguments(address, code)?;
            if self.code_index.contains_key(code) || !codes.insert(code) {
                return Err(ElectionError::DuplicateCode(code.clone()));
            }
            if self.address_index.contains_key(address) || !addresses.insert(address) {
                return Err(ElectionError::DuplicateAddress(*address));
            }
        }
        Ok(())
    }

    /// Append a contender. Callers must have validated the entry.
    pub(crate) fn insert(&mut self, address: Address, code: ContenderCode, now: Timestamp) -> &Contender {
        debug_assert!(self.validate_entry(&address, &code).is_ok());

        let slot = self.contenders.len();
        self.code_index.insert(code.clone(), address);
        self.address_index.insert(address, slot);
        self.contenders.push(Contender {
            address,
            code,
            vote_count: 0,
            registered: true,
            registered_at: now,
        });
        &self.contenders[slot]
    }

    /// Increment the tally of the contender behind `code`
    pub(crate) fn record_vote(&mut self, code: &str) -> Option<&Contender> {
        let slot = self.slot_of(code)?;
        let contender = &mut self.contenders[slot];
        contender.vote_count += 1;
        Some(contender)
    }

    pub fn get(&self, code: &str) -> Option<&Contender> {
        self.slot_of(code).map(|slot| &self.contenders[slot])
    }

    pub fn lookup(&self, code: &str) -> ElectionResult<&Contender> {
        self.get(code)
            .ok_or_else(|| ElectionError::NotFound(code.to_string()))
    }

    pub fn code_to_address(&self, code: &str) -> Option<Address> {
        self.code_index.get(code).copied()
    }

    pub fn is_registered(&self, address: &Address) -> bool {
        self.address_index.contains_key(address)
    }

    /// Registered addresses in registration order
    pub fn addresses(&self) -> Vec<Address> {
        self.contenders.iter().map(|c| c.address).collect()
    }

    /// Contenders in registration order
    pub fn contenders(&self) -> &[Contender] {
        &self.contenders
    }

    /// Sum of all tallies
    pub fn tally_sum(&self) -> u64 {
        self.contenders.iter().map(|c| c.vote_count).sum()
    }

    fn slot_of(&self, code: &str) -> Option<usize> {
        let address = self.code_index.get(code)?;
        self.address_index.get(address).copied()
    }
}

fn validate_arguments(address: &Address, code: &ContenderCode) -> ElectionResult<()> {
    if address.is_zero() {
        return Err(ElectionError::InvalidArgument("Contender address cannot be zero".into()));
    }
    if code.is_empty() {
        return Err(ElectionError::InvalidArgument("Code cannot be empty".into()));
    }
    Ok(())
}
