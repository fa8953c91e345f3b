// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::TargetFormat;

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default output directory for conversions. `None` means "write next
    /// to the input file". A per-request output directory always wins over
    /// this value.
    pub default_output_dir: Option<PathBuf>,
    /// Command used to launch the LibreOffice export server. Usually plain
    /// "soffice"; can be a full path when the binary is not on PATH.
    pub office_command: String,
    /// Target format pre-selected in the dropdown on launch.
    pub default_target: TargetFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_output_dir: None,
            office_command: "soffice".into(),
            default_target: TargetFormat::Pdf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_soffice_on_path() {
        let config = AppConfig::default();
        assert_eq!(config.office_command, "soffice");
        assert!(config.default_output_dir.is_none());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let mut config = AppConfig::default();
        config.default_output_dir = Some(PathBuf::from("/home/user/converted"));
        config.office_command = "/opt/libreoffice/program/soffice".into();

        let json = serde_json::to_string(&config).unwrap();
        let loaded: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.default_output_dir, config.default_output_dir);
        assert_eq!(loaded.office_command, config.office_command);
        assert_eq!(loaded.default_target, TargetFormat::Pdf);
    }
}
