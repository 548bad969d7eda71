use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::election::registry::Contender;
use crate::types::{Address, ContenderCode};

/// Resolved election leader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TypeInfo)]
pub struct Winner {
    pub address: Address,
    pub code: ContenderCode,
    pub vote_count: u64,
}

/// Picks the leading contender from final tallies
pub struct WinnerResolver;

impl WinnerResolver {
    /// Single pass in registration order; a later contender only takes the
    /// lead with strictly more votes, so ties go to the earliest registrant.
    pub fn resolve(contenders: &[Contender]) -> Option<Winner> {
        let (first, rest) = contenders.split_first()?;
        let mut best = first;
        for contender in rest {
            if contender.vote_count > best.vote_count {
                best = contender;
            }
        }
        Some(Winner {
            address: best.address,
            code: best.code.clone(),
            vote_count: best.vote_count,
        })
    }
}
