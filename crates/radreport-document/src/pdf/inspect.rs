// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF inspector — read back a finished report with `lopdf` to check page
// count, page size, and what was drawn on each page.

use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use radreport_core::error::{ReportError, Result};
use tracing::{debug, instrument};

use crate::text::decode_win_ansi;

/// Read-only view of an existing PDF.
pub struct PdfInspector {
    document: Document,
}

impl PdfInspector {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        debug!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            ReportError::Render(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Parse PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            ReportError::Render(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height of a page (1-indexed) in points, from its MediaBox.
    /// The box is looked up through the page tree if the page inherits it.
    pub fn page_size(&self, page_number: u32) -> Result<(f32, f32)> {
        let page_id = self.page_id(page_number)?;
        let media_box = self.inherited_media_box(page_id)?;

        let coords = media_box
            .iter()
            .map(|obj| obj.as_float())
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|err| ReportError::Render(format!("malformed MediaBox: {}", err)))?;

        match coords.as_slice() {
            [llx, lly, urx, ury] => Ok((urx - llx, ury - lly)),
            _ => Err(ReportError::Render(format!(
                "MediaBox has {} entries, expected 4",
                coords.len()
            ))),
        }
    }

    /// Text strings shown on a page (1-indexed), one per text-showing
    /// operator, in content-stream order. Operands are decoded as
    /// Windows-1252, the encoding of the built-in fonts.
    pub fn page_strings(&self, page_number: u32) -> Result<Vec<String>> {
        let mut strings = Vec::new();
        for op in self.page_operations(page_number)? {
            match op.operator.as_str() {
                "Tj" | "'" | "\"" => {
                    if let Some(Object::String(bytes, _)) = op.operands.last() {
                        strings.push(decode_win_ansi(bytes));
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = op.operands.first() {
                        let joined = items
                            .iter()
                            .filter_map(|item| match item {
                                Object::String(bytes, _) => Some(decode_win_ansi(bytes)),
                                _ => None,
                            })
                            .collect::<String>();
                        strings.push(joined);
                    }
                }
                _ => {}
            }
        }
        Ok(strings)
    }

    /// Number of XObjects (images) painted on a page (1-indexed).
    pub fn image_placements(&self, page_number: u32) -> Result<usize> {
        Ok(self
            .page_operations(page_number)?
            .iter()
            .filter(|op| op.operator == "Do")
            .count())
    }

    // -- Helpers --------------------------------------------------------------

    fn page_id(&self, page_number: u32) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            ReportError::Render(format!(
                "page {} not found (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }

    fn page_operations(&self, page_number: u32) -> Result<Vec<lopdf::content::Operation>> {
        let page_id = self.page_id(page_number)?;
        let raw = self.document.get_page_content(page_id).map_err(|err| {
            ReportError::Render(format!("cannot read content of page {}: {}", page_number, err))
        })?;
        let content = Content::decode(&raw).map_err(|err| {
            ReportError::Render(format!(
                "cannot decode content of page {}: {}",
                page_number, err
            ))
        })?;
        Ok(content.operations)
    }

    fn inherited_media_box(&self, page_id: ObjectId) -> Result<&Vec<Object>> {
        let mut node_id = page_id;
        // The page tree is shallow; the bound guards against reference cycles.
        for _ in 0..32 {
            let dict = self
                .document
                .get_object(node_id)
                .and_then(Object::as_dict)
                .map_err(|err| ReportError::Render(format!("bad page object: {}", err)))?;

            if let Ok(media_box) = dict.get(b"MediaBox") {
                let media_box = match media_box {
                    Object::Reference(id) => self.document.get_object(*id).map_err(|err| {
                        ReportError::Render(format!("dangling MediaBox reference: {}", err))
                    })?,
                    direct => direct,
                };
                return media_box
                    .as_array()
                    .map_err(|err| ReportError::Render(format!("malformed MediaBox: {}", err)));
            }

            node_id = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .map_err(|_| ReportError::Render("page has no MediaBox".into()))?;
        }
        Err(ReportError::Render("page tree too deep".into()))
    }
}
