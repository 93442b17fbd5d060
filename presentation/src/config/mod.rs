//! Presentation-level configuration
//!
//! Configuration for output formatting.

use crate::cli::commands::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress bars while rounds run
    pub show_progress: bool,
    /// Print recent events after each round
    pub show_events: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
            show_progress: true,
            show_events: false,
        }
    }
}

impl OutputConfig {
    /// Whether progress bars should be drawn (never alongside JSON output)
    pub fn progress_enabled(&self) -> bool {
        self.show_progress && self.format == OutputFormat::Table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_hides_progress() {
        let config = OutputConfig {
            format: OutputFormat::Json,
            ..OutputConfig::default()
        };
        assert!(!config.progress_enabled());
        assert!(OutputConfig::default().progress_enabled());
    }
}
