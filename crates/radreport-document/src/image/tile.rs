// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tile images — decode a report image (file or in-memory bytes) with the
// `image` crate and convert it into a printpdf `RawImage`.
//
// Tiles are stretched to the tile rectangle at placement time; the decoded
// pixels are never resampled here.

use printpdf::{RawImage, RawImageData, RawImageFormat};
use radreport_core::ImageSource;
use radreport_core::error::{ReportError, Result};
use tracing::{debug, instrument};

/// A decoded image ready to be embedded as a PDF XObject.
pub struct TileImage {
    raw: RawImage,
    width_px: u32,
    height_px: u32,
    source_name: String,
}

impl TileImage {
    /// Decode the image behind `source`.
    ///
    /// Any read or decode failure is reported as `ReportError::Resource`
    /// naming the path or label of the offending source.
    #[instrument(skip_all, fields(source = %source.describe()))]
    pub fn load(source: &ImageSource) -> Result<Self> {
        let source_name = source.describe();
        let decoded = match source {
            ImageSource::Path(path) => ::image::open(path),
            ImageSource::Bytes { data, .. } => ::image::load_from_memory(data),
        }
        .map_err(|err| ReportError::Resource {
            source_name: source_name.clone(),
            reason: err.to_string(),
        })?;

        let width_px = decoded.width();
        let height_px = decoded.height();
        if width_px == 0 || height_px == 0 {
            return Err(ReportError::Resource {
                source_name,
                reason: "image has no pixels".into(),
            });
        }

        // printpdf embeds RGB8 without an alpha mask.
        let rgb = decoded.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width_px as usize,
            height: height_px as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        debug!(width_px, height_px, "Tile image decoded");

        Ok(Self {
            raw,
            width_px,
            height_px,
            source_name,
        })
    }

    pub fn raw(&self) -> &RawImage {
        &self.raw
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Horizontal and vertical scale factors that stretch this image to
    /// `width` x `height` points when placed at 72 DPI (one pixel per point).
    /// Aspect ratio is deliberately not preserved.
    pub fn stretch_to(&self, width: f32, height: f32) -> (f32, f32) {
        (width / self.width_px as f32, height / self.height_px as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{DynamicImage, ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, ::image::Rgb([90, 90, 90])));
        let mut buffer = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn decodes_in_memory_png() {
        let tile = TileImage::load(&ImageSource::bytes("frontal", png_bytes(40, 20))).unwrap();
        assert_eq!((tile.width_px(), tile.height_px()), (40, 20));
        assert_eq!(tile.source_name(), "frontal");
        assert_eq!(tile.raw().width, 40);
    }

    #[test]
    fn stretch_ignores_aspect_ratio() {
        let tile = TileImage::load(&ImageSource::bytes("wide", png_bytes(400, 100))).unwrap();
        assert_eq!(tile.stretch_to(200.0, 200.0), (0.5, 2.0));
    }

    #[test]
    fn garbage_bytes_are_a_resource_error() {
        let err = TileImage::load(&ImageSource::bytes("lateral", b"not an image".to_vec()))
            .err()
            .unwrap();
        match err {
            ReportError::Resource { source_name, .. } => assert_eq!(source_name, "lateral"),
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_resource_error_naming_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");
        let err = TileImage::load(&ImageSource::path(&path)).err().unwrap();
        match err {
            ReportError::Resource { source_name, .. } => {
                assert_eq!(source_name, path.display().to_string())
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn decodes_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image1.png");
        std::fs::write(&path, png_bytes(8, 8)).unwrap();
        let tile = TileImage::load(&ImageSource::path(&path)).unwrap();
        assert_eq!(tile.width_px(), 8);
    }
}
