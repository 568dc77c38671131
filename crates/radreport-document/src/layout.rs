// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report layout planning.
//
// Turns a `LayoutConfig`, a patient name and summary text into a list of
// positioned elements per page. Nothing here touches the PDF backend, so the
// plan is a pure function of its inputs and can be inspected directly.

use radreport_core::ImageView;
use radreport_core::layout::{FontSpec, LayoutConfig};
use tracing::debug;

use crate::text::{capitalize_sentences, wrap_text};

/// Vertical anchors of the first-page blocks, measured from the page bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageAnchors {
    pub title: f32,
    pub patient: f32,
    pub images: f32,
    pub summary: f32,
    /// Baseline of the first summary body line.
    pub body_start: f32,
}

impl PageAnchors {
    pub fn from_layout(layout: &LayoutConfig) -> Self {
        let (_, page_h) = layout.page_size();
        let title = page_h - layout.margin - layout.top_reserve;
        let patient = title - layout.title_to_name;
        let images = patient - layout.name_to_images;
        let summary = images - layout.images_to_summary;
        Self {
            title,
            patient,
            images,
            summary,
            body_start: summary - layout.heading_to_body,
        }
    }
}

/// One positioned item on a page. `x`/`y` is the text baseline origin or the
/// image's bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        font: FontSpec,
        text: String,
    },
    Image {
        view: ImageView,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl Element {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text.as_str()),
            Self::Image { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub elements: Vec<Element>,
}

impl PagePlan {
    fn push_text(&mut self, x: f32, y: f32, font: FontSpec, text: impl Into<String>) {
        self.elements.push(Element::Text {
            x,
            y,
            font,
            text: text.into(),
        });
    }

    /// All text on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(Element::text)
    }
}

/// The complete, backend-independent layout of one report.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub pages: Vec<PagePlan>,
    /// Number of wrapped summary lines.
    pub body_lines: usize,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(PagePlan::texts)
    }
}

/// Lay out a report.
///
/// The header blocks (title, patient line, image tiles, summary heading) only
/// appear on the first page. Summary lines flow downward from the body anchor;
/// after each line the cursor drops by one line height and, once it is below
/// the body floor, a new page starts at the continuation top. The footer is
/// then drawn at a fixed height on whichever page is current, without regard
/// to where the last summary line landed.
pub fn plan_report(layout: &LayoutConfig, patient_name: &str, summary_text: &str) -> LayoutPlan {
    let anchors = PageAnchors::from_layout(layout);
    let fonts = &layout.fonts;
    let labels = &layout.labels;
    let left = layout.margin;

    let mut pages = Vec::new();
    let mut page = PagePlan::default();

    page.push_text(left, anchors.title, fonts.title, labels.title.as_str());
    page.push_text(
        left,
        anchors.patient,
        fonts.patient,
        format!("{}{}", labels.patient_prefix, patient_name),
    );

    let tile_y = anchors.images - layout.tile_height - layout.caption_to_tile;
    for (column, view) in ImageView::ALL.into_iter().enumerate() {
        let x = left + column as f32 * (layout.tile_width + layout.tile_gutter);
        page.push_text(x, anchors.images, fonts.caption, view.caption());
        page.elements.push(Element::Image {
            view,
            x,
            y: tile_y,
            width: layout.tile_width,
            height: layout.tile_height,
        });
    }

    page.push_text(
        left,
        anchors.summary,
        fonts.summary_heading,
        labels.summary_heading.as_str(),
    );

    let lines = wrap_text(&capitalize_sentences(summary_text), layout.wrap_columns);
    let floor = layout.body_floor();
    let mut cursor = anchors.body_start;

    for line in &lines {
        page.push_text(left, cursor, fonts.body, line.as_str());
        cursor -= layout.line_height;
        if cursor < floor {
            pages.push(std::mem::take(&mut page));
            cursor = layout.continuation_top();
        }
    }

    page.push_text(left, floor, fonts.footer_label, labels.footer_label.as_str());
    for (name, offset) in labels.signatories.iter().zip(&layout.footer_line_offsets) {
        page.push_text(left, floor - offset, fonts.footer_names, name.as_str());
    }
    pages.push(page);

    debug!(
        body_lines = lines.len(),
        pages = pages.len(),
        "Report layout planned"
    );

    LayoutPlan {
        pages,
        body_lines: lines.len(),
    }
}
