use serde::{Deserialize, Serialize};

use crate::election::{ElectionError, ElectionResult};
use crate::types::Address;

/// Single-owner access control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
}

impl AccessControl {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn is_owner(&self, caller: &Address) -> bool {
        *caller == self.owner
    }

    /// Reject any caller other than the owner
    pub fn ensure_owner(&self, caller: &Address) -> ElectionResult<()> {
        self.ensure_owner_for(caller, "call this function")
    }

    /// Reject any caller other than the owner, naming the guarded action
    pub fn ensure_owner_for(&self, caller: &Address, action: &'static str) -> ElectionResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(ElectionError::Unauthorized { caller: *caller, action })
        }
    }
}
