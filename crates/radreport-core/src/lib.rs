// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// radreport — Core types, layout configuration and error definitions shared
// across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod layout;
pub mod types;

pub use config::{AppConfig, InferenceConfig};
pub use error::{ReportError, Result};
pub use human_errors::{DisplayMessage, Severity, humanize_error};
pub use layout::{FontFace, FontSpec, LayoutConfig};
pub use types::*;
