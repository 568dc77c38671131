// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// radreport-app — submission handling for the radreport front end.

pub mod form;
pub mod shell;

pub use form::{Submission, Upload, ValidSubmission};
pub use shell::{ArtifactSummary, ReportArtifact, ReportShell, ShellOutcome, report_file_name};
