//! Simulation configuration from TOML (`[simulation]` section)
//!
//! ```toml
//! [simulation]
//! mode = "auto"            # or "manual"
//! round_interval = 30      # seconds, 10..=300
//! base_funding_rate = 1000 # 100..=10000
//! max_companies = 10       # 2..=20
//! decision_timeout = 60    # seconds, 30..=300
//! initial_companies = 3
//! ```

use boardroom_domain::{ConfigRangeError, ConfigUpdate, SimulationConfig, SimulationMode};
use serde::{Deserialize, Serialize};

/// Raw simulation configuration from TOML
///
/// Numbers are signed so that a negative value is reported by range
/// validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSimulationConfig {
    /// Round mode: "auto" or "manual"
    pub mode: String,
    #[serde(alias = "step_interval")]
    pub round_interval: i64,
    pub base_funding_rate: i64,
    pub max_companies: i64,
    pub decision_timeout: i64,
    pub initial_companies: u32,
}

impl Default for FileSimulationConfig {
    fn default() -> Self {
        let defaults = SimulationConfig::default();
        Self {
            mode: SimulationMode::default().to_string(),
            round_interval: defaults.round_interval as i64,
            base_funding_rate: defaults.base_funding_rate,
            max_companies: defaults.max_companies as i64,
            decision_timeout: defaults.decision_timeout as i64,
            initial_companies: defaults.initial_companies,
        }
    }
}

impl FileSimulationConfig {
    /// Parse the mode string
    pub fn parse_mode(&self) -> Option<SimulationMode> {
        self.mode.parse().ok()
    }

    /// Convert into a domain configuration.
    ///
    /// Out-of-range values keep the default; [`SimulationConfig::apply`]
    /// reports them.
    pub fn to_simulation_config(&self) -> (SimulationConfig, Vec<ConfigRangeError>) {
        let mut config = SimulationConfig {
            initial_companies: self.initial_companies,
            ..SimulationConfig::default()
        };
        let update = ConfigUpdate::default()
            .with_round_interval(self.round_interval)
            .with_base_funding_rate(self.base_funding_rate)
            .with_max_companies(self.max_companies)
            .with_decision_timeout(self.decision_timeout);
        let errors = config.apply(&update);
        (config, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_converts_cleanly() {
        let (config, errors) = FileSimulationConfig::default().to_simulation_config();
        assert!(errors.is_empty());
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(
            FileSimulationConfig::default().parse_mode(),
            Some(SimulationMode::Manual)
        );
    }

    #[test]
    fn test_deserialize_with_alias() {
        let toml_str = r#"
[simulation]
mode = "auto"
step_interval = 45
max_companies = 4
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.simulation.round_interval, 45);
        assert_eq!(config.simulation.parse_mode(), Some(SimulationMode::Auto));

        let (converted, errors) = config.simulation.to_simulation_config();
        assert!(errors.is_empty());
        assert_eq!(converted.max_companies, 4);
        assert_eq!(converted.base_funding_rate, 1000);
    }

    #[test]
    fn test_out_of_range_keeps_default() {
        let file = FileSimulationConfig {
            round_interval: 5,
            ..FileSimulationConfig::default()
        };
        let (config, errors) = file.to_simulation_config();
        assert_eq!(errors.len(), 1);
        assert_eq!(config.round_interval, 30);
    }
}
