use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::logger::{LoggerFormat, LoggerLevel, LoggerTimeZone};

/// Logger configuration, usually a section of the process config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: LoggerLevel,
    pub tz: LoggerTimeZone,
    /// Include the record target (module path).
    pub with_targets: bool,
    /// Colored text output; ignored unless stdout is a terminal.
    pub use_color: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::default(),
            level: LoggerLevel::default(),
            tz: LoggerTimeZone::default(),
            with_targets: true,
            use_color: true,
        }
    }
}

impl LoggerConfig {
    pub fn should_use_color(&self) -> bool {
        self.use_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: LoggerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, LoggerConfig::default());
        assert_eq!(cfg.level.as_str(), "info");
        assert_eq!(cfg.format, LoggerFormat::Text);
    }

    #[test]
    fn partial_section() {
        let cfg: LoggerConfig =
            serde_json::from_str(r#"{"format": "json", "level": "cpboot_core=debug,info", "withTargets": false}"#)
                .unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level.as_str(), "cpboot_core=debug,info");
        assert!(!cfg.with_targets);
        assert!(cfg.use_color);
        assert_eq!(cfg.tz, LoggerTimeZone::Utc);
    }

    #[test]
    fn invalid_level_rejects_section() {
        assert!(serde_json::from_str::<LoggerConfig>(r#"{"level": "scheduler=chatty"}"#).is_err());
    }

    #[test]
    fn color_off_when_disabled() {
        let cfg = LoggerConfig {
            use_color: false,
            ..Default::default()
        };
        assert!(!cfg.should_use_color());
    }
}
