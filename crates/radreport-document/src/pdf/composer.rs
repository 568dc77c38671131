// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report composer — render a `LayoutPlan` into a PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: each planned page becomes a
// `PdfPage` holding a `Vec<Op>`, and the whole document is serialised via
// `PdfDocument::save()`. The result is parsed back with lopdf, its text
// re-encoded as Windows-1252, and only then handed out.

use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object};
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
    XObjectId, XObjectTransform,
};
use radreport_core::error::{ReportError, Result};
use radreport_core::layout::{FontFace, FontSpec, LayoutConfig};
use radreport_core::{ImageSource, ImageView, ReportRequest};
use tracing::{debug, info, instrument, warn};

use crate::artifact::RenderedDocument;
use crate::image::TileImage;
use crate::layout::{Element, LayoutPlan, PagePlan, plan_report};
use crate::text::{encode_win_ansi, ensure_encodable};

/// Images are placed at 72 DPI so one source pixel spans one point before
/// the tile scale is applied.
const PLACEMENT_DPI: f32 = 72.0;

/// Builds radiology report PDFs with a fixed layout.
pub struct ReportComposer {
    layout: LayoutConfig,
}

impl ReportComposer {
    /// Create a composer with the given layout.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Borrow the active layout.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Lay out a report without rendering it.
    pub fn plan(&self, request: &ReportRequest) -> LayoutPlan {
        plan_report(&self.layout, request.patient_name(), request.summary_text())
    }

    // -- Composition ----------------------------------------------------------

    /// Compose the report for `request`.
    ///
    /// Fails with `ReportError::Resource` if either image cannot be decoded,
    /// and with `ReportError::Render` if any text cannot be shown by the
    /// built-in fonts or the finished document does not read back correctly.
    #[instrument(skip_all)]
    pub fn compose(&self, request: ReportRequest) -> Result<RenderedDocument> {
        let frontal = TileImage::load(request.image(ImageView::Frontal))?;
        let lateral = TileImage::load(request.image(ImageView::Lateral))?;

        let plan = self.plan(&request);
        for text in plan.texts() {
            ensure_encodable(text)?;
        }

        info!(
            pages = plan.page_count(),
            body_lines = plan.body_lines,
            "Composing report PDF"
        );

        let mut doc = PdfDocument::new(&self.layout.labels.title);
        let frontal_id = doc.add_image(frontal.raw());
        let lateral_id = doc.add_image(lateral.raw());

        let tiles = [
            (ImageView::Frontal, frontal_id, &frontal),
            (ImageView::Lateral, lateral_id, &lateral),
        ];
        let (width_mm, height_mm) = self.layout.paper.dimensions_mm();
        let pages: Vec<PdfPage> = plan
            .pages
            .iter()
            .map(|page| {
                PdfPage::new(
                    Mm(width_mm),
                    Mm(height_mm),
                    page_ops(page, &tiles),
                )
            })
            .collect();
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        for warning in &warnings {
            warn!(?warning, "printpdf reported a warning while saving");
        }

        let rendered = finalize(bytes, plan.page_count())?;
        info!(
            bytes = rendered.len(),
            pages = rendered.page_count(),
            sha256 = rendered.sha256(),
            "Report PDF complete"
        );
        Ok(rendered)
    }

    /// Compose a report from image files on disk.
    pub fn compose_from_paths(
        &self,
        patient_name: &str,
        frontal_path: impl AsRef<Path>,
        lateral_path: impl AsRef<Path>,
        summary_text: &str,
    ) -> Result<RenderedDocument> {
        let request = ReportRequest::new(
            patient_name,
            ImageSource::path(frontal_path.as_ref()),
            ImageSource::path(lateral_path.as_ref()),
            summary_text,
        )?;
        self.compose(request)
    }

    /// Compose a report and write it directly to a file.
    pub fn write_to_file(&self, request: ReportRequest, path: impl AsRef<Path>) -> Result<()> {
        self.compose(request)?.write_to(path)
    }
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

/// Compose a report with the default A4 layout.
pub fn compose_report(
    patient_name: &str,
    frontal_path: impl AsRef<Path>,
    lateral_path: impl AsRef<Path>,
    summary_text: &str,
) -> Result<RenderedDocument> {
    ReportComposer::default().compose_from_paths(
        patient_name,
        frontal_path,
        lateral_path,
        summary_text,
    )
}

// -- Rendering helpers --------------------------------------------------------

/// Embedded image for each view: XObject id and decoded tile.
type TileTable<'a> = [(ImageView, XObjectId, &'a TileImage); 2];

/// Translate one planned page into printpdf operations.
fn page_ops(page: &PagePlan, tiles: &TileTable<'_>) -> Vec<Op> {
    let mut ops = Vec::new();

    for element in &page.elements {
        match element {
            Element::Text { x, y, font, text } => {
                let builtin = builtin_font(font);
                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point { x: Pt(*x), y: Pt(*y) },
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(font.size),
                    font: builtin,
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(text.clone())],
                    font: builtin,
                });
                ops.push(Op::EndTextSection);
            }
            Element::Image {
                view,
                x,
                y,
                width,
                height,
            } => {
                let Some((_, id, tile)) = tiles.iter().find(|(v, _, _)| v == view) else {
                    continue;
                };
                let (scale_x, scale_y) = tile.stretch_to(*width, *height);
                ops.push(Op::UseXobject {
                    id: id.clone(),
                    transform: XObjectTransform {
                        translate_x: Some(Pt(*x)),
                        translate_y: Some(Pt(*y)),
                        scale_x: Some(scale_x),
                        scale_y: Some(scale_y),
                        dpi: Some(PLACEMENT_DPI),
                        rotate: None,
                    },
                });
            }
        }
    }

    ops
}

fn builtin_font(font: &FontSpec) -> BuiltinFont {
    match font.face {
        FontFace::Regular => BuiltinFont::Helvetica,
        FontFace::Bold => BuiltinFont::HelveticaBold,
    }
}

/// Re-encode text operands, then confirm the result parses with the planned
/// page count.
///
/// printpdf writes built-in font strings as UTF-8 while declaring
/// WinAnsiEncoding, so every string operand is rewritten as Windows-1252.
fn finalize(bytes: Vec<u8>, expected_pages: usize) -> Result<RenderedDocument> {
    if bytes.is_empty() {
        return Err(ReportError::Render("PDF serialiser produced no output".into()));
    }
    let mut document = Document::load_mem(&bytes)
        .map_err(|err| ReportError::Render(format!("finalised PDF does not parse: {}", err)))?;

    let pages = document.get_pages();
    if pages.len() != expected_pages {
        return Err(ReportError::Render(format!(
            "finalised PDF has {} pages, layout planned {}",
            pages.len(),
            expected_pages
        )));
    }

    for (page_number, page_id) in pages {
        let raw = document.get_page_content(page_id).map_err(|err| {
            ReportError::Render(format!("cannot read content of page {}: {}", page_number, err))
        })?;
        let mut content = Content::decode(&raw).map_err(|err| {
            ReportError::Render(format!("cannot decode content of page {}: {}", page_number, err))
        })?;
        for op in &mut content.operations {
            if matches!(op.operator.as_str(), "Tj" | "TJ" | "'" | "\"") {
                for operand in &mut op.operands {
                    reencode_operand(operand)?;
                }
            }
        }
        let encoded = content.encode().map_err(|err| {
            ReportError::Render(format!("cannot encode content of page {}: {}", page_number, err))
        })?;
        document
            .change_page_content(page_id, encoded)
            .map_err(|err| {
                ReportError::Render(format!("cannot replace content of page {}: {}", page_number, err))
            })?;
    }

    let mut output = Vec::new();
    document
        .save_to(&mut output)
        .map_err(|err| ReportError::Render(format!("cannot serialise PDF: {}", err)))?;

    debug!(pages = expected_pages, bytes = output.len(), "Finalised PDF verified");
    Ok(RenderedDocument::new(output, expected_pages))
}

/// Rewrite a UTF-8 string operand (or the strings of a `TJ` array) as
/// Windows-1252. Operands that are not valid UTF-8 are already single-byte.
fn reencode_operand(operand: &mut Object) -> Result<()> {
    match operand {
        Object::String(bytes, _) => {
            let encoded = match std::str::from_utf8(bytes) {
                Ok(text) => encode_win_ansi(text)?,
                Err(_) => return Ok(()),
            };
            *bytes = encoded;
        }
        Object::Array(items) => {
            for item in items {
                reencode_operand(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}
