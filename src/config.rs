/*!
# Election Configuration Module

Runtime settings for an election service. Rules of the election itself
(three contenders at most, two needed to open a session) are fixed and live
in `election::MAX_CONTENDERS` / `election::MIN_CONTENDERS`; this module only
covers how the service around the aggregate behaves.

```rust
use voting_engine::config::ElectionConfig;

# fn main() {
let config = ElectionConfig::from_json(r#"{ "event_capacity": 16 }"#).unwrap();
assert_eq!(config.event_capacity, 16);
assert!(config.enable_metrics);
# }
```
*/

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Election service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectionConfig {
    /// Buffer size of the notification broadcast channel
    pub event_capacity: usize,
    /// Maximum number of event records retained in history
    pub history_limit: usize,
    /// Whether to record metrics
    pub enable_metrics: bool,
}

impl Default for ElectionConfig {
    fn default() -> Self {
        Self {
            event_capacity: 100,
            history_limit: 10_000,
            enable_metrics: true,
        }
    }
}

impl ElectionConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(Error::Config)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.event_capacity == 0 {
            return Err("Event capacity cannot be 0".into());
        }
        if self.history_limit == 0 {
            return Err("History limit cannot be 0".into());
        }
        Ok(())
    }
}
