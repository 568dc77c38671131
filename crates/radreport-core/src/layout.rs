// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Declarative report geometry.
//
// Every distance the composer uses lives here so that layout tuning never
// touches the pagination code. All values are PDF points unless noted.

use serde::{Deserialize, Serialize};

use crate::types::PaperSize;

/// Weight of one of the PDF base-14 Helvetica faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFace {
    Regular,
    Bold,
}

/// A face and a size, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub face: FontFace,
    pub size: f32,
}

impl FontSpec {
    pub const fn regular(size: f32) -> Self {
        Self {
            face: FontFace::Regular,
            size,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            face: FontFace::Bold,
            size,
        }
    }
}

/// Fonts for each text block of the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutFonts {
    pub title: FontSpec,
    pub patient: FontSpec,
    pub caption: FontSpec,
    pub summary_heading: FontSpec,
    pub body: FontSpec,
    pub footer_label: FontSpec,
    pub footer_names: FontSpec,
}

impl Default for LayoutFonts {
    fn default() -> Self {
        Self {
            title: FontSpec::bold(16.0),
            patient: FontSpec::regular(12.0),
            caption: FontSpec::bold(14.0),
            summary_heading: FontSpec::bold(12.0),
            body: FontSpec::regular(12.0),
            footer_label: FontSpec::bold(16.0),
            footer_names: FontSpec::regular(12.0),
        }
    }
}

/// Fixed text printed on every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutLabels {
    pub title: String,
    /// Prefix of the patient line; the name is appended verbatim.
    pub patient_prefix: String,
    pub summary_heading: String,
    pub footer_label: String,
    /// Signatory lines under the footer label, top to bottom.
    pub signatories: Vec<String>,
}

impl Default for LayoutLabels {
    fn default() -> Self {
        Self {
            title: "Radiology Report".into(),
            patient_prefix: "Patient Name: ".into(),
            summary_heading: "Report Summary:".into(),
            footer_label: "Prepared By:".into(),
            signatories: vec![
                "Reporting Radiologist".into(),
                "Reviewing Radiologist".into(),
                "Attending Physician".into(),
            ],
        }
    }
}

/// Report page geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub paper: PaperSize,
    pub margin: f32,
    /// Space between the top margin and the title, also the restart offset
    /// for continuation pages.
    pub top_reserve: f32,
    /// Space above the bottom margin that body text may not enter. The
    /// footer label sits on this line.
    pub bottom_reserve: f32,
    pub line_height: f32,
    pub title_to_name: f32,
    pub name_to_images: f32,
    pub images_to_summary: f32,
    pub heading_to_body: f32,
    pub tile_width: f32,
    pub tile_height: f32,
    /// Horizontal space between the two tiles.
    pub tile_gutter: f32,
    /// Space between a caption baseline and the top edge of its tile.
    pub caption_to_tile: f32,
    /// Wrap width of the summary body, in characters.
    pub wrap_columns: usize,
    /// Offsets of the signatory lines below the footer label.
    pub footer_line_offsets: Vec<f32>,
    pub fonts: LayoutFonts,
    pub labels: LayoutLabels,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            margin: 50.0,
            top_reserve: 50.0,
            bottom_reserve: 50.0,
            line_height: 14.0,
            title_to_name: 30.0,
            name_to_images: 100.0,
            images_to_summary: 250.0,
            heading_to_body: 20.0,
            tile_width: 200.0,
            tile_height: 200.0,
            tile_gutter: 50.0,
            caption_to_tile: 10.0,
            wrap_columns: 90,
            footer_line_offsets: vec![20.0, 32.0, 44.0],
            fonts: LayoutFonts::default(),
            labels: LayoutLabels::default(),
        }
    }
}

impl LayoutConfig {
    /// Page size in points.
    pub fn page_size(&self) -> (f32, f32) {
        self.paper.dimensions_pt()
    }

    /// Lowest baseline body text may occupy before a page break.
    pub fn body_floor(&self) -> f32 {
        self.margin + self.bottom_reserve
    }

    /// Baseline of the first body line on a continuation page.
    pub fn continuation_top(&self) -> f32 {
        self.page_size().1 - self.margin - self.top_reserve
    }
}
