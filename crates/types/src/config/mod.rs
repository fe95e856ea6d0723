// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the changeover kernel.
use serde::{Deserialize, Serialize};

/// Node-level configuration of the validator-set changeover.
///
/// This is read once at startup and must be identical on every node of a network.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ChangeoverConfig {
    /// When true, the DKG committee is computed one block before the next aeon
    /// starts and promoted into the consensus set two blocks before it. When false,
    /// both phases run on every block (instant-finality test networks).
    pub delay_validator_updates: bool,
}

fn default_delay_validator_updates() -> bool {
    true
}

impl Default for ChangeoverConfig {
    fn default() -> Self {
        Self {
            delay_validator_updates: default_delay_validator_updates(),
        }
    }
}

impl ChangeoverConfig {
    /// A configuration with changeover delay disabled.
    pub fn eager() -> Self {
        Self {
            delay_validator_updates: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_defaults_to_delayed() {
        let cfg: ChangeoverConfig = toml::from_str("").unwrap();
        assert!(cfg.delay_validator_updates);
    }

    #[test]
    fn parses_explicit_flag() {
        let cfg: ChangeoverConfig = toml::from_str("delay_validator_updates = false").unwrap();
        assert_eq!(cfg, ChangeoverConfig::eager());
    }
}
