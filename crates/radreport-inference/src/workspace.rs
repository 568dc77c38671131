// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-request upload workspace.
//
// Every request gets its own directory, named after its request id, under the
// configured work root. Concurrent submissions therefore never overwrite each
// other's images. The directory is removed on drop unless asked to keep it.

use std::path::{Path, PathBuf};

use radreport_core::error::Result;
use radreport_core::{ImageView, RequestId};
use tracing::{debug, info, warn};

use crate::engine::InferenceInput;

/// Scratch directory holding one request's uploaded images.
#[derive(Debug)]
pub struct RequestWorkspace {
    id: RequestId,
    dir: PathBuf,
    keep: bool,
}

impl RequestWorkspace {
    /// Create `<root>/request-<id>`. The path is made absolute so it stays
    /// valid for a child process running in a different directory.
    pub async fn create(root: impl AsRef<Path>, keep: bool) -> Result<Self> {
        let id = RequestId::new();
        let root = std::path::absolute(root.as_ref())?;
        let dir = root.join(format!("request-{id}"));
        tokio::fs::create_dir_all(&dir).await?;
        info!(path = %dir.display(), "Request workspace created");
        Ok(Self { id, dir, keep })
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the upload for `view` is stored.
    pub fn image_path(&self, view: ImageView) -> PathBuf {
        self.dir.join(view.upload_file_name())
    }

    /// Write the uploaded bytes for `view`, replacing any earlier upload in
    /// this workspace.
    pub async fn persist(&self, view: ImageView, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.image_path(view);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "Upload persisted");
        Ok(path)
    }

    /// Input for the inference engine pointing at this workspace's images.
    pub fn inference_input(&self) -> InferenceInput {
        InferenceInput {
            frontal: self.image_path(ImageView::Frontal),
            lateral: self.image_path(ImageView::Lateral),
        }
    }
}

impl Drop for RequestWorkspace {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => debug!(path = %self.dir.display(), "Request workspace removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => warn!(path = %self.dir.display(), "cannot remove request workspace: {err}"),
        }
    }
}
