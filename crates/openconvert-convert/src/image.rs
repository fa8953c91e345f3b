// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image re-encode pathway — decode with the `image` crate, re-encode in the
// target format. No resizing, no quality knobs: the codec defaults own the
// output, this module only moves pixels between containers.

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};

use openconvert_core::error::{ConvertError, Result};
use openconvert_core::types::TargetFormat;

/// Map a raster target format onto the `image` crate's format identifier.
fn image_format(target: TargetFormat) -> Option<ImageFormat> {
    match target {
        TargetFormat::Png => Some(ImageFormat::Png),
        TargetFormat::Jpg | TargetFormat::Jpeg => Some(ImageFormat::Jpeg),
        TargetFormat::Webp => Some(ImageFormat::WebP),
        TargetFormat::Bmp => Some(ImageFormat::Bmp),
        TargetFormat::Tiff => Some(ImageFormat::Tiff),
        TargetFormat::Pdf => None,
    }
}

/// Re-encode `input` as `target`, writing the result to `output`.
///
/// JPEG cannot carry an alpha channel, so jpg/jpeg targets are flattened to
/// RGB8 first — any transparency is dropped silently. Documented behaviour,
/// not a defect.
#[instrument(skip_all, fields(input = %input.display(), target = %target))]
pub fn reencode(input: &Path, output: &Path, target: TargetFormat) -> Result<()> {
    let format = image_format(target).ok_or_else(|| {
        // The dispatch table never routes PDF here; guard anyway.
        ConvertError::UnsupportedConversion {
            extension: String::new(),
            target: target.to_string(),
        }
    })?;

    let img = image::open(input).map_err(|err| {
        ConvertError::ExternalTool(format!("failed to decode image {}: {err}", input.display()))
    })?;

    let img = match target {
        TargetFormat::Jpg | TargetFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img,
    };

    debug!(width = img.width(), height = img.height(), "image decoded");

    img.save_with_format(output, format).map_err(|err| {
        ConvertError::ExternalTool(format!("failed to encode {}: {err}", output.display()))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_test_png(path: &Path, alpha: u8) {
        let img = RgbaImage::from_pixel(12, 8, Rgba([200u8, 40, 40, alpha]));
        img.save(path).unwrap();
    }

    #[test]
    fn same_format_roundtrip_preserves_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_test_png(&input, 255);

        reencode(&input, &output, TargetFormat::Png).unwrap();

        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 8));
    }

    #[test]
    fn jpeg_target_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.jpg");
        write_test_png(&input, 128);

        reencode(&input, &output, TargetFormat::Jpg).unwrap();

        let decoded = image::open(&output).unwrap();
        assert!(!decoded.color().has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (12, 8));
    }

    #[test]
    fn png_to_bmp_and_back_keeps_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let bmp = dir.path().join("mid.bmp");
        write_test_png(&input, 255);

        reencode(&input, &bmp, TargetFormat::Bmp).unwrap();

        let decoded = image::open(&bmp).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 8));
    }

    #[test]
    fn corrupt_input_reports_external_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.png");
        let output = dir.path().join("out.png");
        std::fs::write(&input, b"this is not a png").unwrap();

        match reencode(&input, &output, TargetFormat::Png) {
            Err(ConvertError::ExternalTool(msg)) => {
                assert!(msg.contains("decode"), "{msg}");
            }
            other => panic!("expected ExternalTool, got {other:?}"),
        }
    }
}
