// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report shell — turns a form submission into a downloadable report.
//
// Flow: validate → persist uploads into a fresh request workspace → run the
// inference engine → compose the PDF from its output. Every failure is turned
// into a user-facing message at this boundary; nothing is retried.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use radreport_core::error::Result;
use radreport_core::{
    AppConfig, DisplayMessage, ImageSource, ImageView, ReportRequest, RequestId, humanize_error,
};
use radreport_document::{RenderedDocument, ReportComposer};
use radreport_inference::{InferenceEngine, RequestWorkspace};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::form::Submission;

/// A finished report ready to hand to the user.
#[derive(Debug, Clone)]
pub struct ReportArtifact {
    pub request_id: RequestId,
    /// Suggested download name, `{patient}_report.pdf`.
    pub file_name: String,
    pub document: RenderedDocument,
    pub generated_at: DateTime<Utc>,
}

impl ReportArtifact {
    /// Serializable facts about the artifact (everything but the bytes).
    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            request_id: self.request_id,
            file_name: self.file_name.clone(),
            pages: self.document.page_count(),
            bytes: self.document.len(),
            sha256: self.document.sha256().to_owned(),
            generated_at: self.generated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    pub request_id: RequestId,
    pub file_name: String,
    pub pages: usize,
    pub bytes: usize,
    pub sha256: String,
    pub generated_at: DateTime<Utc>,
}

/// Result of one submission as presented to the user.
#[derive(Debug, Clone)]
pub enum ShellOutcome {
    Ready(ReportArtifact),
    Message(DisplayMessage),
}

/// Download name for a patient's report. Characters that would break a file
/// name (path separators, control characters) become `_`.
pub fn report_file_name(patient_name: &str) -> String {
    let safe: String = patient_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{safe}_report.pdf")
}

/// Orchestrates one report generation per submission.
pub struct ReportShell<E> {
    engine: E,
    composer: ReportComposer,
    work_dir: PathBuf,
    keep_uploads: bool,
}

impl<E: InferenceEngine> ReportShell<E> {
    pub fn new(engine: E, composer: ReportComposer, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            composer,
            work_dir: work_dir.into(),
            keep_uploads: false,
        }
    }

    /// Build a shell from the application configuration.
    pub fn from_config(config: &AppConfig, engine: E) -> Self {
        Self {
            engine,
            composer: ReportComposer::new(config.layout.clone()),
            work_dir: config.work_dir.clone(),
            keep_uploads: config.keep_uploads,
        }
    }

    pub fn keep_uploads(mut self, keep: bool) -> Self {
        self.keep_uploads = keep;
        self
    }

    /// Run the full pipeline for one submission.
    #[instrument(skip_all)]
    pub async fn submit(&self, submission: Submission) -> Result<ReportArtifact> {
        let valid = submission.validate()?;

        let workspace = RequestWorkspace::create(&self.work_dir, self.keep_uploads).await?;
        for view in ImageView::ALL {
            workspace.persist(view, &valid.upload(view).bytes).await?;
        }
        info!(request_id = %workspace.id(), "Processing images");

        let input = workspace.inference_input();
        let output = self.engine.infer(&input).await?;
        if !output.diagnostics.trim().is_empty() {
            info!(diagnostics = %output.diagnostics.trim_end(), "Inference diagnostics");
        }
        if output.report_text.trim().is_empty() {
            warn!(request_id = %workspace.id(), "Inference produced no report text");
        }

        let request = ReportRequest::new(
            valid.patient_name.as_str(),
            ImageSource::path(&input.frontal),
            ImageSource::path(&input.lateral),
            output.report_text,
        )?;
        let document = self.composer.compose(request)?;

        let artifact = ReportArtifact {
            request_id: workspace.id(),
            file_name: report_file_name(&valid.patient_name),
            document,
            generated_at: Utc::now(),
        };
        info!(
            request_id = %artifact.request_id,
            pages = artifact.document.page_count(),
            "Report generated successfully"
        );
        debug!(request_id = %artifact.request_id, file_name = %artifact.file_name, "Report named");
        Ok(artifact)
    }

    /// Like [`ReportShell::submit`], but never fails: errors become messages.
    pub async fn handle(&self, submission: Submission) -> ShellOutcome {
        match self.submit(submission).await {
            Ok(artifact) => ShellOutcome::Ready(artifact),
            Err(err) => {
                let message = humanize_error(&err);
                match message.severity {
                    radreport_core::Severity::Warning => warn!(%err, "Submission rejected"),
                    radreport_core::Severity::Error => error!(%err, "Report generation failed"),
                }
                ShellOutcome::Message(message)
            }
        }
    }
}
