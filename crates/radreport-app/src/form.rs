// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Submission form state: the two uploads and the patient name, and the
// check that gates report generation.

use std::path::Path;

use radreport_core::error::{ReportError, Result};
use radreport_core::human_errors::MISSING_INPUT_WARNING;
use radreport_core::ImageView;

/// Upload types the form accepts.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// One uploaded image as received from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read an upload from disk, keeping only the file name.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }

    fn has_accepted_extension(&self) -> bool {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|ok| ext.eq_ignore_ascii_case(ok))
            })
            .unwrap_or(false)
    }
}

/// Raw form contents. Any field may be missing.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub frontal: Option<Upload>,
    pub lateral: Option<Upload>,
    pub patient_name: Option<String>,
}

/// A submission with every required field present and usable.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    pub patient_name: String,
    pub frontal: Upload,
    pub lateral: Upload,
}

impl ValidSubmission {
    pub fn upload(&self, view: ImageView) -> &Upload {
        match view {
            ImageView::Frontal => &self.frontal,
            ImageView::Lateral => &self.lateral,
        }
    }
}

impl Submission {
    /// Check that both images and a non-blank patient name are present.
    ///
    /// Missing or empty inputs produce the standard "please upload both
    /// images" warning; an upload of the wrong type names the offending view.
    pub fn validate(self) -> Result<ValidSubmission> {
        let patient_name = self
            .patient_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());

        let (Some(frontal), Some(lateral), Some(patient_name)) =
            (self.frontal, self.lateral, patient_name)
        else {
            return Err(ReportError::Validation(MISSING_INPUT_WARNING.into()));
        };

        for (view, upload) in [(ImageView::Frontal, &frontal), (ImageView::Lateral, &lateral)] {
            if upload.bytes.is_empty() {
                return Err(ReportError::Validation(MISSING_INPUT_WARNING.into()));
            }
            if !upload.has_accepted_extension() {
                return Err(ReportError::Validation(format!(
                    "The {} must be a JPG or PNG image (got \"{}\").",
                    view_label(view),
                    upload.file_name
                )));
            }
        }

        Ok(ValidSubmission {
            patient_name,
            frontal,
            lateral,
        })
    }
}

fn view_label(view: ImageView) -> &'static str {
    match view {
        ImageView::Frontal => "frontal image",
        ImageView::Lateral => "lateral image",
    }
}
