//! Reward configuration

use serde::Deserialize;

use crate::domain::episode::RewardTable;

use super::error::ValidationError;

/// Reward configuration
///
/// Success and failure rewards scale with the turn limit unless set
/// explicitly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewardConfig {
    /// Defaults to `2 * max_turns`
    pub success: Option<f64>,

    /// Defaults to `-max_turns`
    pub failure: Option<f64>,

    /// Defaults to `-1`
    pub per_turn: Option<f64>,
}

impl RewardConfig {
    /// Resolve the reward table for a given turn limit
    pub fn table(&self, max_turns: usize) -> RewardTable {
        let scaled = RewardTable::scaled_to(max_turns);
        RewardTable::new(
            self.success.unwrap_or(scaled.success),
            self.failure.unwrap_or(scaled.failure),
            self.per_turn.unwrap_or(scaled.per_turn),
        )
    }

    pub fn validate(&self, max_turns: usize) -> Result<(), ValidationError> {
        let table = self.table(max_turns);
        if table.success <= table.failure {
            return Err(ValidationError::RewardOrdering {
                success: table.success,
                failure: table.failure,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_scale_with_max_turns() {
        let table = RewardConfig::default().table(40);
        assert_eq!(table, RewardTable::new(80.0, -40.0, -1.0));
    }

    #[test]
    fn explicit_values_win() {
        let config = RewardConfig {
            success: Some(20.0),
            failure: None,
            per_turn: Some(0.0),
        };
        assert_eq!(config.table(10), RewardTable::new(20.0, -10.0, 0.0));
    }

    #[test]
    fn success_must_exceed_failure() {
        let config = RewardConfig {
            success: Some(-50.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(40),
            Err(ValidationError::RewardOrdering { .. })
        ));
    }
}
