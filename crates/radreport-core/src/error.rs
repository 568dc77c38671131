// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for radreport.

use thiserror::Error;

/// Top-level error type for all radreport operations.
#[derive(Debug, Error)]
pub enum ReportError {
    // -- Submission errors --
    /// A required input (image or patient name) is missing or unusable.
    #[error("{0}")]
    Validation(String),

    // -- Inference errors --
    /// The inference command ran but exited unsuccessfully.
    #[error("inference command failed (exit code {}): {stderr}", display_code(.code))]
    Subprocess { code: Option<i32>, stderr: String },

    #[error("inference command could not be started: {0}")]
    InferenceUnavailable(String),

    #[error("inference command timed out after {seconds}s")]
    InferenceTimeout { seconds: u64 },

    // -- Composition errors --
    /// An image could not be read or decoded.
    #[error("cannot read image {source_name}: {reason}")]
    Resource { source_name: String, reason: String },

    #[error("PDF rendering failed: {0}")]
    Render(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none, terminated by signal".into(),
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ReportError>;
