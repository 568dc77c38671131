// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The composer's output — finished PDF bytes plus the facts callers usually
// want about them.

use std::path::Path;

use radreport_core::error::Result;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// A finished, verified PDF report. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    bytes: Vec<u8>,
    page_count: usize,
    sha256: String,
}

impl RenderedDocument {
    pub(crate) fn new(bytes: Vec<u8>, page_count: usize) -> Self {
        let sha256 = hash_bytes(&bytes);
        Self {
            bytes,
            page_count,
            sha256,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Lowercase hex SHA-256 of the PDF bytes.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Write the PDF to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        debug!(
            path = %path.as_ref().display(),
            bytes = self.bytes.len(),
            "Wrote report PDF"
        );
        Ok(())
    }
}
