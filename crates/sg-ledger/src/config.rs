//! Configuration for the social-graph ledger.

use crate::domain::scoring::{ActionFactors, LevelThresholds, RecommendationPolicy, ReputationFactors};
use crate::domain::state_machine::ProtocolState;
use crate::domain::value_objects::{Address, WhitelistKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scoring policy knobs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Handling of profiles with no judged recommendations.
    pub recommendation_policy: RecommendationPolicy,
    /// Reputation step function.
    pub levels: LevelThresholds,
}

/// Ledger configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Address of the ledger hub; back-reference stored on ownership records.
    pub hub: Address,
    /// Governance address at genesis.
    pub governance: Address,
    /// Emergency admin at genesis.
    pub emergency_admin: Option<Address>,
    /// Protocol state at genesis.
    pub initial_state: ProtocolState,
    /// Only whitelisted callers may create profiles.
    pub require_whitelisted_profile_creators: bool,
    /// Maximum handle length in bytes.
    pub max_handle_length: usize,
    /// Maximum content or image URI length in bytes.
    pub max_uri_length: usize,
    /// Action weights written as revision 1.
    pub genesis_action_factors: ActionFactors,
    /// Reputation weights written as revision 1.
    pub genesis_reputation_factors: ReputationFactors,
    /// Whitelist entries written at genesis.
    #[serde(default)]
    pub genesis_whitelist: Vec<(WhitelistKind, Address)>,
    /// Scoring policy.
    pub scoring: ScoringConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            hub: Address::repeat_byte(0x5a),
            governance: Address::repeat_byte(0x60),
            emergency_admin: None,
            initial_state: ProtocolState::Unpaused,
            require_whitelisted_profile_creators: false,
            max_handle_length: 31,
            max_uri_length: 6_000,
            genesis_action_factors: ActionFactors::default(),
            genesis_reputation_factors: ReputationFactors::default(),
            genesis_whitelist: Vec::new(),
            scoring: ScoringConfig::default(),
        }
    }
}

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Hub or governance is the zero address.
    #[error("{field} must not be the zero address")]
    ZeroAddress {
        /// Name of the offending setting.
        field: &'static str,
    },

    /// Level thresholds are not strictly ascending.
    #[error("level thresholds must be strictly ascending")]
    UnsortedThresholds,

    /// Level ceiling exceeds what the score multiplier can represent.
    #[error("max level {max_level} exceeds {ceiling}")]
    TooManyLevels {
        /// Highest level the thresholds allow.
        max_level: u32,
        /// Highest level a score multiplier can represent.
        ceiling: u32,
    },

    /// Handle length limit of zero.
    #[error("max handle length must be positive")]
    ZeroHandleLength,
}

impl LedgerConfig {
    /// Checks the configuration for inconsistent settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hub.is_zero() {
            return Err(ConfigError::ZeroAddress { field: "hub" });
        }
        if self.governance.is_zero() {
            return Err(ConfigError::ZeroAddress { field: "governance" });
        }
        if self.max_handle_length == 0 {
            return Err(ConfigError::ZeroHandleLength);
        }
        if !self.scoring.levels.is_ascending() {
            return Err(ConfigError::UnsortedThresholds);
        }
        if self.scoring.levels.max_level > LevelThresholds::LEVEL_CEILING {
            return Err(ConfigError::TooManyLevels {
                max_level: self.scoring.levels.max_level,
                ceiling: LevelThresholds::LEVEL_CEILING,
            });
        }
        Ok(())
    }

    /// Builder-style governance override.
    #[must_use]
    pub fn with_governance(mut self, governance: Address) -> Self {
        self.governance = governance;
        self
    }

    /// Builder-style emergency admin override.
    #[must_use]
    pub fn with_emergency_admin(mut self, admin: Address) -> Self {
        self.emergency_admin = Some(admin);
        self
    }

    /// Builder-style genesis whitelist entry.
    #[must_use]
    pub fn with_whitelisted(mut self, kind: WhitelistKind, address: Address) -> Self {
        self.genesis_whitelist.push((kind, address));
        self
    }

    /// Builder-style recommendation policy override.
    #[must_use]
    pub fn with_recommendation_policy(mut self, policy: RecommendationPolicy) -> Self {
        self.scoring.recommendation_policy = policy;
        self
    }
}
