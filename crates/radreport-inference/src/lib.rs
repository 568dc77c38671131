// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// radreport-inference — the boundary to the external report model.
//
// Provides the `InferenceEngine` trait, the subprocess implementation that
// runs the model script, and per-request workspaces for uploaded images.

pub mod command;
pub mod engine;
pub mod workspace;

pub use command::CommandEngine;
pub use engine::{InferenceEngine, InferenceInput, InferenceOutput};
pub use workspace::RequestWorkspace;
