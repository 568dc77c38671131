// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for radreport.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ReportError, Result};

/// Unique identifier for one report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two radiographic projections a report is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageView {
    Frontal,
    Lateral,
}

impl ImageView {
    pub const ALL: [ImageView; 2] = [ImageView::Frontal, ImageView::Lateral];

    /// Caption drawn above the image tile.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::Frontal => "Frontal Image:",
            Self::Lateral => "Lateral Image:",
        }
    }

    /// File name the upload is persisted under inside a request workspace.
    pub fn upload_file_name(&self) -> &'static str {
        match self {
            Self::Frontal => "image1.png",
            Self::Lateral => "image2.png",
        }
    }
}

/// Where the pixels for an image tile come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    /// Encoded image bytes (PNG, JPEG) already in memory.
    Bytes { label: String, data: Vec<u8> },
}

impl ImageSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(label: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Bytes {
            label: label.into(),
            data,
        }
    }

    /// Name used in diagnostics: the file path, or the label for in-memory data.
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes { label, .. } => label.clone(),
        }
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

/// Everything the composer needs for one report. Immutable once built.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    patient_name: String,
    frontal: ImageSource,
    lateral: ImageSource,
    summary_text: String,
}

impl ReportRequest {
    /// Build a request. The patient name must contain something other than
    /// whitespace; it is stored trimmed.
    pub fn new(
        patient_name: impl Into<String>,
        frontal: impl Into<ImageSource>,
        lateral: impl Into<ImageSource>,
        summary_text: impl Into<String>,
    ) -> Result<Self> {
        let patient_name = patient_name.into().trim().to_owned();
        if patient_name.is_empty() {
            return Err(ReportError::Validation(
                "patient name must not be empty".into(),
            ));
        }
        Ok(Self {
            patient_name,
            frontal: frontal.into(),
            lateral: lateral.into(),
            summary_text: summary_text.into(),
        })
    }

    pub fn patient_name(&self) -> &str {
        &self.patient_name
    }

    pub fn image(&self, view: ImageView) -> &ImageSource {
        match view {
            ImageView::Frontal => &self.frontal,
            ImageView::Lateral => &self.lateral,
        }
    }

    pub fn summary_text(&self) -> &str {
        &self.summary_text
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A5 => (148.0, 210.0),
            // US sizes are defined in inches.
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm as f32, *height_mm as f32),
        }
    }

    /// Dimensions in PDF points (1pt = 1/72 inch). A4 is 595.28 x 841.89,
    /// Letter is 612 x 792.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            Self::Letter => (612.0, 792.0),
            Self::Legal => (612.0, 1008.0),
            _ => {
                let (w, h) = self.dimensions_mm();
                (mm_to_pt(w), mm_to_pt(h))
            }
        }
    }
}

fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}
