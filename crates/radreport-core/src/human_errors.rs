// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing messages.
//
// Every error reaching the submission boundary is turned into one of these
// instead of propagating further. Nothing is retried automatically.

use serde::Serialize;

use crate::error::ReportError;

/// Warning text shown when the form is submitted incomplete.
pub const MISSING_INPUT_WARNING: &str =
    "Please upload both images and enter the patient's name to proceed.";

/// How a message is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The user can correct the input and submit again.
    Warning,
    /// Processing failed.
    Error,
}

/// A message ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMessage {
    pub severity: Severity,
    pub text: String,
}

impl std::fmt::Display for DisplayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Convert a `ReportError` into the message the user sees.
pub fn humanize_error(err: &ReportError) -> DisplayMessage {
    match err {
        ReportError::Validation(detail) => DisplayMessage {
            severity: Severity::Warning,
            text: detail.clone(),
        },

        ReportError::Subprocess { stderr, .. } => {
            let detail = if stderr.trim().is_empty() {
                "Unknown error occurred"
            } else {
                stderr.trim_end()
            };
            DisplayMessage {
                severity: Severity::Error,
                text: format!("Error in processing: {detail}"),
            }
        }

        other => DisplayMessage {
            severity: Severity::Error,
            text: format!("An unexpected error occurred: {other}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_a_warning() {
        let msg = humanize_error(&ReportError::Validation(MISSING_INPUT_WARNING.into()));
        assert_eq!(msg.severity, Severity::Warning);
        assert_eq!(msg.text, MISSING_INPUT_WARNING);
    }

    #[test]
    fn subprocess_stderr_is_surfaced_verbatim() {
        let err = ReportError::Subprocess {
            code: Some(1),
            stderr: "CUDA out of memory\n".into(),
        };
        let msg = humanize_error(&err);
        assert_eq!(msg.severity, Severity::Error);
        assert_eq!(msg.text, "Error in processing: CUDA out of memory");
    }

    #[test]
    fn empty_stderr_becomes_unknown_error() {
        let err = ReportError::Subprocess {
            code: Some(1),
            stderr: "  ".into(),
        };
        assert_eq!(
            humanize_error(&err).text,
            "Error in processing: Unknown error occurred"
        );
    }

    #[test]
    fn other_errors_are_unexpected() {
        let err = ReportError::Resource {
            source_name: "image1.png".into(),
            reason: "truncated".into(),
        };
        let msg = humanize_error(&err);
        assert_eq!(msg.severity, Severity::Error);
        assert!(msg.text.starts_with("An unexpected error occurred:"));
        assert!(msg.text.contains("image1.png"));
    }
}
