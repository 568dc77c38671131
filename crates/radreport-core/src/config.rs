// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::layout::LayoutConfig;

/// Default file name for the persisted configuration.
pub const CONFIG_FILE: &str = "radreport.json";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "RADREPORT_CONFIG";

/// How to invoke the external report-generation model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Executable to spawn (no shell is involved).
    pub program: String,
    /// Arguments placed before the model flags, e.g. the script path.
    pub script_args: Vec<String>,
    /// Passed as `--checkpoint`.
    pub checkpoint: PathBuf,
    /// Passed as `--ann_path`.
    pub annotation_path: PathBuf,
    /// Passed as `--threshold`.
    pub threshold: u32,
    /// Working directory of the child process. Defaults to the caller's.
    pub working_dir: Option<PathBuf>,
    /// Seconds before the child is killed.
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            program: "python".into(),
            script_args: vec!["inference.py".into()],
            checkpoint: PathBuf::from("ran_models/1_best_model.pth"),
            annotation_path: PathBuf::from("data/iu_xray/annotation.json"),
            threshold: 3,
            working_dir: None,
            timeout_secs: 300,
        }
    }
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub layout: LayoutConfig,
    pub inference: InferenceConfig,
    /// Root under which per-request upload directories are created.
    pub work_dir: PathBuf,
    /// Keep the request directory (uploads) after the report is produced.
    pub keep_uploads: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            inference: InferenceConfig::default(),
            work_dir: PathBuf::from("uploaded_images"),
            keep_uploads: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields the defaults;
    /// a present but malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).map_err(|err| {
                ReportError::Config(format!("invalid {}: {}", path.display(), err))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ReportError::Io(err)),
        }
    }

    /// Write configuration to `path` as pretty-printed JSON.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the configuration path: explicit argument, then
    /// `RADREPORT_CONFIG`, then `radreport.json` in the current directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(env_path);
        }
        PathBuf::from(CONFIG_FILE)
    }
}
