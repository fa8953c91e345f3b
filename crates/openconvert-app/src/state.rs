// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.

use openconvert_core::AppConfig;
use openconvert_core::types::ConversionJob;

use crate::services::app_services::AppServices;

/// Conversion progress stages for the UI indicator.
///
/// Stages are deliberately coarse: the delegated libraries report no real
/// progress, so the indicator is indeterminate while `Converting` instead of
/// pretending to know a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertStage {
    /// No active conversion.
    Idle,
    /// Validating the request and resolving the output path.
    Preparing,
    /// The delegated library or application is running.
    Converting,
    /// Conversion finished.
    Complete,
    /// Conversion failed.
    Failed,
}

impl ConvertStage {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Preparing => "Preparing...",
            Self::Converting => "Converting...",
            Self::Complete => "Completed",
            Self::Failed => "Failed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Complete => "#155724",
            Self::Failed => "#721c24",
            _ => "#007aff",
        }
    }

    pub fn bg(&self) -> &'static str {
        match self {
            Self::Complete => "#d4edda",
            Self::Failed => "#f8d7da",
            _ => "#e7f3ff",
        }
    }

    /// Whether a request is in flight (the Convert button is disabled).
    pub fn in_flight(&self) -> bool {
        matches!(self, Self::Preparing | Self::Converting)
    }
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application settings.
    pub config: AppConfig,
    /// Session history of conversion jobs, newest first.
    pub jobs: Vec<ConversionJob>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self {
            config: svc.config(),
            jobs: svc.all_jobs(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            jobs: Vec::new(),
        }
    }
}
