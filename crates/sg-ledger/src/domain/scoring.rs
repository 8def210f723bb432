//! # Scoring Model
//!
//! Pure score arithmetic: action weights, reputation, level and the
//! level-scaled marginal delta of a single action.
//!
//! ```text
//! reputation = contentScore * w.contentScore
//!            + answers      * w.answers
//!            + successful * w.stakeSuccess / attempted
//! level      = #{ t in thresholds : t <= reputation }   (capped at max_level)
//! delta      = weight[kind] * 2^level
//! ```
//!
//! Intermediates are computed in `i128` and narrowed with a checked
//! conversion, so overflow surfaces as `ArithmeticOverflow`.

use super::entities::ProfileStats;
use super::value_objects::ActionKind;
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};

// =============================================================================
// FACTOR TABLES
// =============================================================================

/// Per-action-kind weights for one revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFactors {
    /// Weights indexed by [`ActionKind::index`].
    pub weights: [i64; ActionKind::COUNT],
}

impl ActionFactors {
    /// Builds a table from `(kind, weight)` pairs; missing kinds weigh zero.
    #[must_use]
    pub fn from_pairs(pairs: &[(ActionKind, i64)]) -> Self {
        let mut weights = [0; ActionKind::COUNT];
        for (kind, weight) in pairs {
            weights[kind.index()] = *weight;
        }
        Self { weights }
    }

    /// Weight of `kind`.
    #[must_use]
    pub fn weight(&self, kind: ActionKind) -> i64 {
        self.weights[kind.index()]
    }
}

impl Default for ActionFactors {
    fn default() -> Self {
        Self::from_pairs(&[
            (ActionKind::Comment, 3),
            (ActionKind::Like, 1),
            (ActionKind::Upvote, 2),
            (ActionKind::Downvote, -2),
            (ActionKind::Report, -5),
            (ActionKind::Collect, 4),
            (ActionKind::Mirror, 3),
        ])
    }
}

/// Reputation weights for one revision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationFactors {
    /// Weight of the total content score.
    pub content_score: i64,
    /// Weight of the answers count.
    pub answers: i64,
    /// Weight of the recommendation success ratio.
    pub stake_success: i64,
}

impl Default for ReputationFactors {
    fn default() -> Self {
        Self {
            content_score: 1,
            answers: 2,
            stake_success: 10,
        }
    }
}

/// How reputation treats a profile with no judged recommendations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationPolicy {
    /// Fail with `DivisionByZero`.
    ///
    /// Every scoring action computes the content owner's reputation, so
    /// under this policy collect, vote, like, report, mirror and comment on
    /// content whose owner has no attempted recommendations are rejected.
    Strict,
    /// Contribute zero.
    #[default]
    TreatAsZero,
}

// =============================================================================
// LEVELS
// =============================================================================

/// Ascending reputation thresholds; each one reached adds a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThresholds {
    /// Thresholds in ascending order.
    pub thresholds: Vec<i64>,
    /// Level ceiling.
    pub max_level: u32,
}

impl LevelThresholds {
    /// Largest level whose multiplier still fits an `i64`.
    pub const LEVEL_CEILING: u32 = 62;

    /// Level for `reputation`. Monotonic non-decreasing.
    #[must_use]
    pub fn level(&self, reputation: i64) -> u32 {
        let reached = self.thresholds.iter().take_while(|t| **t <= reputation).count();
        u32::try_from(reached).unwrap_or(u32::MAX).min(self.max_level)
    }

    /// Returns true if the thresholds are strictly ascending.
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.thresholds.windows(2).all(|w| w[0] < w[1])
    }
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            thresholds: vec![100, 1_000, 10_000, 100_000],
            max_level: 4,
        }
    }
}

// =============================================================================
// SCORE MODEL
// =============================================================================

/// The factor tables and policies in force for one operation.
#[derive(Clone, Copy, Debug)]
pub struct ScoreModel<'a> {
    /// Action weights of the current revision.
    pub actions: &'a ActionFactors,
    /// Reputation weights of the current revision.
    pub reputation: &'a ReputationFactors,
    /// Level step function.
    pub levels: &'a LevelThresholds,
    /// Zero-recommendation handling.
    pub policy: RecommendationPolicy,
}

impl ScoreModel<'_> {
    /// Reputation of a profile with the given aggregates.
    pub fn reputation(&self, stats: &ProfileStats) -> Result<i64, LedgerError> {
        let w = self.reputation;
        let overflow = || LedgerError::ArithmeticOverflow;
        let content = i128::from(stats.content_score)
            .checked_mul(i128::from(w.content_score))
            .ok_or_else(overflow)?;
        let answers = i128::from(stats.answers)
            .checked_mul(i128::from(w.answers))
            .ok_or_else(overflow)?;
        let stake = if stats.recommendations_attempted == 0 {
            match self.policy {
                RecommendationPolicy::Strict => return Err(LedgerError::DivisionByZero),
                RecommendationPolicy::TreatAsZero => 0,
            }
        } else {
            i128::from(stats.recommendations_successful)
                .checked_mul(i128::from(w.stake_success))
                .ok_or_else(overflow)?
                / i128::from(stats.recommendations_attempted)
        };

        let total = content
            .checked_add(answers)
            .and_then(|sum| sum.checked_add(stake))
            .ok_or_else(overflow)?;
        i64::try_from(total).map_err(|_| overflow())
    }

    /// Level of a profile with the given aggregates.
    pub fn level(&self, stats: &ProfileStats) -> Result<u32, LedgerError> {
        Ok(self.levels.level(self.reputation(stats)?))
    }

    /// Marginal score contribution of one `kind` action on content owned by
    /// a profile with `owner_stats`. Zero weights short-circuit before the
    /// level is computed.
    pub fn delta(&self, kind: ActionKind, owner_stats: &ProfileStats) -> Result<i64, LedgerError> {
        let weight = self.actions.weight(kind);
        if weight == 0 {
            return Ok(0);
        }
        let level = self.level(owner_stats)?;
        2i64.checked_pow(level)
            .and_then(|multiplier| weight.checked_mul(multiplier))
            .ok_or(LedgerError::ArithmeticOverflow)
    }
}
