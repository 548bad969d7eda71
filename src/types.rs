/*!
# Core Types

Identity and key types shared by every election component.

- `Address`: 20-byte account identity, shown as `0x`-prefixed lowercase hex.
  The all-zero address is the null identity and can never be registered.
- `ContenderCode`: the short, case-sensitive code voters use to pick a contender.
- `Timestamp`: seconds since the UNIX epoch, as reported by a `Clock`.
- `ElectionId`: random identifier stamped on every notification of one election.

```rust
use voting_engine::types::{Address, ContenderCode};

# fn main() {
let alice: Address = "0x00000000000000000000000000000000000000a1".parse().unwrap();
assert_eq!(alice, Address::from_low_u64_be(0xa1));
assert!(!alice.is_zero());

let code = ContenderCode::new("ALICE");
assert_eq!(code.as_str(), "ALICE");
# }
```
*/

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Seconds since the UNIX epoch
pub type Timestamp = u64;

/// Account identity
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode, TypeInfo)]
pub struct Address(#[serde(with = "hex::serde")] [u8; 20]);

impl Address {
    /// The null identity
    pub const ZERO: Address = Address([0; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Build an address whose last eight bytes hold `value` big-endian
    pub fn from_low_u64_be(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 20]
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

/// Contender code, compared case-sensitively
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Encode, Decode, TypeInfo)]
#[serde(transparent)]
pub struct ContenderCode(String);

impl ContenderCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContenderCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ContenderCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContenderCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ContenderCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier of an election instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElectionId(Uuid);

impl ElectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ElectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
