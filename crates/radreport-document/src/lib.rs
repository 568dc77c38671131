// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// radreport-document — the report composer.
//
// Lays out a fixed-format radiology report (title, patient line, frontal and
// lateral image tiles, wrapped summary text, signatory footer) and renders it
// to a paginated A4 PDF. Text preparation and page planning are pure and
// independent of the PDF backend.

pub mod artifact;
pub mod image;
pub mod layout;
pub mod pdf;
pub mod text;

// Re-export the primary items so callers can use `radreport_document::ReportComposer` etc.
pub use artifact::{RenderedDocument, hash_bytes};
pub use image::TileImage;
pub use layout::{LayoutPlan, PageAnchors, plan_report};
pub use pdf::{PdfInspector, ReportComposer, compose_report};
pub use text::{capitalize_sentences, wrap_text};
