// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for OpenConvert.

use thiserror::Error;

/// Top-level error type for all OpenConvert operations.
#[derive(Debug, Error)]
pub enum ConvertError {
    // -- Conversion errors --
    /// No dispatch rule matches the (input extension, target format) pair.
    #[error("cannot convert .{extension} to {target}")]
    UnsupportedConversion { extension: String, target: String },

    /// The delegated library or external application failed: missing file,
    /// corrupt input, export server unavailable, bad exit status.
    #[error("external tool failed: {0}")]
    ExternalTool(String),

    // -- Infrastructure --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ConvertError>;
