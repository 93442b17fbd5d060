//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
///
/// ```toml
/// [logging]
/// audit_log = "~/.local/share/boardroom/audit.jsonl"
/// log_file = "boardroom.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL audit trail of lifecycle commands, decisions and rounds
    pub audit_log: Option<PathBuf>,
    /// Diagnostic log file (in addition to stderr)
    pub log_file: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Audit log path with a leading `~` expanded
    pub fn audit_log_path(&self) -> Option<PathBuf> {
        self.audit_log.as_deref().map(expand_home)
    }

    /// Log file path with a leading `~` expanded
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.log_file.as_deref().map(expand_home)
    }
}

fn expand_home(path: &std::path::Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_expansion() {
        let config = FileLoggingConfig {
            audit_log: Some(PathBuf::from("~/boardroom/audit.jsonl")),
            log_file: Some(PathBuf::from("run.log")),
        };

        let audit = config.audit_log_path().unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(audit, home.join("boardroom/audit.jsonl"));
        }
        assert_eq!(config.log_file_path(), Some(PathBuf::from("run.log")));
        assert!(FileLoggingConfig::default().audit_log_path().is_none());
    }
}
