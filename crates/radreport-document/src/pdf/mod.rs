// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — composing reports and reading them back.

pub mod composer;
pub mod inspect;

pub use composer::{ReportComposer, compose_report};
pub use inspect::PdfInspector;
