//! Bounded simulation configuration
//!
//! Every tunable has an inclusive range. An update validates each field on
//! its own: in-range fields are applied, out-of-range fields are reported
//! and leave the current value untouched.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// A bounded configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    RoundInterval,
    BaseFundingRate,
    MaxCompanies,
    DecisionTimeout,
}

impl ConfigField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigField::RoundInterval => "round_interval",
            ConfigField::BaseFundingRate => "base_funding_rate",
            ConfigField::MaxCompanies => "max_companies",
            ConfigField::DecisionTimeout => "decision_timeout",
        }
    }

    /// Inclusive valid range
    pub fn range(&self) -> (i64, i64) {
        match self {
            ConfigField::RoundInterval => (10, 300),
            ConfigField::BaseFundingRate => (100, 10_000),
            ConfigField::MaxCompanies => (2, 20),
            ConfigField::DecisionTimeout => (30, 300),
        }
    }

    /// Check a value against the field's range
    pub fn check(&self, value: i64) -> Result<i64, ConfigRangeError> {
        let (min, max) = self.range();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(ConfigRangeError {
                field: *self,
                value,
                min,
                max,
            })
        }
    }
}

impl std::fmt::Display for ConfigField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field} = {value} is out of range [{min}, {max}]")]
pub struct ConfigRangeError {
    pub field: ConfigField,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds between auto rounds
    pub round_interval: u64,
    /// Base funding rate, the unit of every fund change
    pub base_funding_rate: i64,
    /// Upper bound on the seeded population
    pub max_companies: u32,
    /// Seconds each AI call may take before it counts as failed
    pub decision_timeout: u64,
    /// Companies founded at reset (capped by `max_companies`)
    pub initial_companies: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            round_interval: 30,
            base_funding_rate: 1000,
            max_companies: 10,
            decision_timeout: 60,
            initial_companies: 3,
        }
    }
}

impl SimulationConfig {
    pub fn round_interval_duration(&self) -> Duration {
        Duration::from_secs(self.round_interval)
    }

    pub fn decision_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.decision_timeout)
    }

    /// Number of companies a reset seeds
    pub fn seeded_companies(&self) -> usize {
        self.initial_companies.clamp(1, self.max_companies) as usize
    }

    /// Apply an update field by field.
    ///
    /// Returns the errors for rejected fields; an empty vector means every
    /// supplied field was applied.
    pub fn apply(&mut self, update: &ConfigUpdate) -> Vec<ConfigRangeError> {
        let mut errors = Vec::new();

        if let Some(value) = update.round_interval {
            match ConfigField::RoundInterval.check(value) {
                Ok(v) => self.round_interval = v as u64,
                Err(e) => errors.push(e),
            }
        }
        if let Some(value) = update.base_funding_rate {
            match ConfigField::BaseFundingRate.check(value) {
                Ok(v) => self.base_funding_rate = v,
                Err(e) => errors.push(e),
            }
        }
        if let Some(value) = update.max_companies {
            match ConfigField::MaxCompanies.check(value) {
                Ok(v) => self.max_companies = v as u32,
                Err(e) => errors.push(e),
            }
        }
        if let Some(value) = update.decision_timeout {
            match ConfigField::DecisionTimeout.check(value) {
                Ok(v) => self.decision_timeout = v as u64,
                Err(e) => errors.push(e),
            }
        }

        errors
    }

    /// Validate every bounded field of a complete configuration
    pub fn validate(&self) -> Result<(), Vec<ConfigRangeError>> {
        let errors: Vec<_> = [
            (ConfigField::RoundInterval, self.round_interval as i64),
            (ConfigField::BaseFundingRate, self.base_funding_rate),
            (ConfigField::MaxCompanies, self.max_companies as i64),
            (ConfigField::DecisionTimeout, self.decision_timeout as i64),
        ]
        .into_iter()
        .filter_map(|(field, value)| field.check(value).err())
        .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Partial configuration update
///
/// Values are signed so that negative input is reported as out of range
/// rather than failing to parse. `step_interval` is accepted as an alias of
/// `round_interval`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default, alias = "step_interval", skip_serializing_if = "Option::is_none")]
    pub round_interval: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_funding_rate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_companies: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision_timeout: Option<i64>,
}

impl ConfigUpdate {
    pub fn with_round_interval(mut self, seconds: i64) -> Self {
        self.round_interval = Some(seconds);
        self
    }

    pub fn with_base_funding_rate(mut self, rate: i64) -> Self {
        self.base_funding_rate = Some(rate);
        self
    }

    pub fn with_max_companies(mut self, max: i64) -> Self {
        self.max_companies = Some(max);
        self
    }

    pub fn with_decision_timeout(mut self, seconds: i64) -> Self {
        self.decision_timeout = Some(seconds);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.round_interval.is_none()
            && self.base_funding_rate.is_none()
            && self.max_companies.is_none()
            && self.decision_timeout.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_step_interval_alias_below_range_is_rejected() {
        let update: ConfigUpdate = serde_json::from_str(r#"{"step_interval": 5}"#).unwrap();
        assert_eq!(update.round_interval, Some(5));

        let mut config = SimulationConfig::default();
        let errors = config.apply(&update);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, ConfigField::RoundInterval);
        assert_eq!(errors[0].to_string(), "round_interval = 5 is out of range [10, 300]");
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_partial_update_applies_in_range_fields() {
        let mut config = SimulationConfig::default();
        let update = ConfigUpdate::default()
            .with_round_interval(45)
            .with_base_funding_rate(50)
            .with_max_companies(20)
            .with_decision_timeout(301);

        let errors = config.apply(&update);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec![ConfigField::BaseFundingRate, ConfigField::DecisionTimeout]
        );
        assert_eq!(config.round_interval, 45);
        assert_eq!(config.max_companies, 20);
        assert_eq!(config.base_funding_rate, 1000);
        assert_eq!(config.decision_timeout, 60);
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        let mut config = SimulationConfig::default();
        let update = ConfigUpdate::default()
            .with_round_interval(10)
            .with_base_funding_rate(10_000)
            .with_max_companies(2)
            .with_decision_timeout(300);

        assert!(config.apply(&update).is_empty());
        assert_eq!(config.round_interval, 10);
        assert_eq!(config.base_funding_rate, 10_000);
        assert_eq!(config.max_companies, 2);
        assert_eq!(config.decision_timeout, 300);
    }

    #[test]
    fn test_negative_values_are_reported() {
        let mut config = SimulationConfig::default();
        let errors = config.apply(&ConfigUpdate::default().with_max_companies(-3));
        assert_eq!(errors[0].value, -3);
    }

    #[test]
    fn test_seeded_companies_is_capped() {
        let config = SimulationConfig {
            initial_companies: 12,
            max_companies: 5,
            ..SimulationConfig::default()
        };
        assert_eq!(config.seeded_companies(), 5);
    }
}
