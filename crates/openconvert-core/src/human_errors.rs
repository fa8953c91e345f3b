// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the conversion dialog.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity levels drive icon and colour in the UI.

use crate::error::ConvertError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// May succeed if simply tried again.
    Transient,
    /// User must do something (pick the file again, install LibreOffice).
    ActionRequired,
    /// Cannot be fixed by retrying or user action — unsupported pair,
    /// damaged file.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `ConvertError` into a `HumanError` for the result dialog.
pub fn humanize_error(err: &ConvertError) -> HumanError {
    match err {
        ConvertError::UnsupportedConversion { extension, target } => HumanError {
            message: "This file type can't be converted to the selected format.".into(),
            suggestion: format!(
                "A .{extension} file can't become a {} file. Pick a different \
                 output format from the dropdown.",
                target.to_uppercase()
            ),
            severity: Severity::Permanent,
        },

        ConvertError::ExternalTool(detail) => humanize_tool_error(detail),

        ConvertError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Try choosing the file again."
                        .into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app doesn't have permission to use that file.".into(),
                    suggestion: "Check the file permissions, or try copying the file to a different location first.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, your disk may be full.".into(),
                    severity: Severity::Transient,
                }
            }
        }

        ConvertError::Serialization(_) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            severity: Severity::Transient,
        },
    }
}

/// Parse delegated-tool error details into human-readable messages.
fn humanize_tool_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("input file not found") {
        HumanError {
            message: "The file couldn't be found.".into(),
            suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("soffice") && (lower.contains("not found") || lower.contains("no such file")) {
        HumanError {
            message: "LibreOffice isn't installed (or couldn't be found).".into(),
            suggestion: "Converting office documents needs LibreOffice. Install it, or set the full path to soffice in Settings.".into(),
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("permission denied") {
        HumanError {
            message: "The app doesn't have permission to use that file.".into(),
            suggestion: "Check the file permissions, or try copying the file to a different location first.".into(),
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("decode") || lower.contains("corrupt") || lower.contains("unsupported image") {
        HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try opening it in an image viewer to check it works.".into(),
            severity: Severity::Permanent,
        }
    } else if lower.contains("exited with") || lower.contains("export") {
        HumanError {
            message: "The document couldn't be exported.".into(),
            suggestion: format!(
                "The file may be damaged or password-protected. Try opening it \
                 in LibreOffice first to check it works. (Detail: {detail})"
            ),
            severity: Severity::Permanent,
        }
    } else {
        // Generic tool-failure fallback
        HumanError {
            message: "The conversion didn't work.".into(),
            suggestion: format!("Try again. (Detail: {detail})"),
            severity: Severity::Transient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_pair_is_permanent() {
        let err = ConvertError::UnsupportedConversion {
            extension: "docx".into(),
            target: "png".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Permanent);
        assert!(human.suggestion.contains("PNG"));
    }

    #[test]
    fn missing_soffice_is_action_required() {
        let err = ConvertError::ExternalTool(
            "failed to launch soffice: No such file or directory".into(),
        );
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("LibreOffice"));
    }

    #[test]
    fn missing_input_is_action_required() {
        let err = ConvertError::ExternalTool("input file not found: /tmp/gone.txt".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn corrupt_image_is_permanent() {
        let err = ConvertError::ExternalTool("failed to decode image /tmp/x.png".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn io_not_found_is_action_required() {
        let err = ConvertError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
    }
}
