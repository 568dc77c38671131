// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inference boundary.
//
// Report text comes from a model this project does not own. The shell only
// sees this trait, so the subprocess implementation can be swapped for an
// in-process or remote one without touching the composer.

use std::future::Future;
use std::path::PathBuf;

use radreport_core::ImageView;
use radreport_core::error::Result;

/// Paths of the persisted images handed to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceInput {
    pub frontal: PathBuf,
    pub lateral: PathBuf,
}

impl InferenceInput {
    pub fn image(&self, view: ImageView) -> &PathBuf {
        match view {
            ImageView::Frontal => &self.frontal,
            ImageView::Lateral => &self.lateral,
        }
    }
}

/// What the model produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceOutput {
    /// Free-form findings text, fed to the composer as the summary.
    pub report_text: String,
    /// Anything the model wrote to its diagnostic channel on success.
    pub diagnostics: String,
}

/// A source of report text for a pair of chest images.
pub trait InferenceEngine {
    /// Generate report text for the two images.
    ///
    /// Failures are reported as `ReportError::Subprocess`,
    /// `ReportError::InferenceUnavailable` or `ReportError::InferenceTimeout`.
    fn infer(&self, input: &InferenceInput) -> impl Future<Output = Result<InferenceOutput>> + Send;
}
