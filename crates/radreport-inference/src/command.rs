// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subprocess inference — runs the external report-generation script.
//
// Invocation:
//   <program> <script_args..> --checkpoint <path> --image_paths <frontal> <lateral>
//             --ann_path <path> --threshold <int>
//
// The child is spawned directly (no shell), stdout is the report text and
// stderr the diagnostics. A non-zero exit is a failure; so is running longer
// than the configured timeout, in which case the child is killed.

use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;

use radreport_core::InferenceConfig;
use radreport_core::error::{ReportError, Result};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::engine::{InferenceEngine, InferenceInput, InferenceOutput};

/// Runs the inference script as a child process.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    config: InferenceConfig,
}

impl CommandEngine {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Full argument list passed to the program.
    pub fn build_args(&self, input: &InferenceInput) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.config.script_args.iter().map(OsString::from).collect();
        args.push("--checkpoint".into());
        args.push(self.config.checkpoint.clone().into_os_string());
        args.push("--image_paths".into());
        args.push(input.frontal.clone().into_os_string());
        args.push(input.lateral.clone().into_os_string());
        args.push("--ann_path".into());
        args.push(self.config.annotation_path.clone().into_os_string());
        args.push("--threshold".into());
        args.push(self.config.threshold.to_string().into());
        args
    }
}

impl InferenceEngine for CommandEngine {
    #[instrument(skip_all, fields(program = %self.config.program))]
    async fn infer(&self, input: &InferenceInput) -> Result<InferenceOutput> {
        let mut command = Command::new(&self.config.program);
        command
            .args(self.build_args(input))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        info!(
            frontal = %input.frontal.display(),
            lateral = %input.lateral.display(),
            "Running inference command"
        );

        let child = command.spawn().map_err(|err| {
            ReportError::InferenceUnavailable(format!("{}: {}", self.config.program, err))
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout(), child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(timeout_secs = self.config.timeout_secs, "Inference command timed out");
                return Err(ReportError::InferenceTimeout {
                    seconds: self.config.timeout_secs,
                });
            }
        };

        let report_text = String::from_utf8_lossy(&output.stdout).into_owned();
        let diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            warn!(
                code = ?output.status.code(),
                stderr_len = diagnostics.len(),
                "Inference command failed"
            );
            return Err(ReportError::Subprocess {
                code: output.status.code(),
                stderr: diagnostics,
            });
        }

        debug!(
            stdout_len = report_text.len(),
            stderr_len = diagnostics.len(),
            "Inference command succeeded"
        );

        Ok(InferenceOutput {
            report_text,
            diagnostics,
        })
    }
}
