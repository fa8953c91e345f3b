// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion dispatcher — the rule table at the heart of OpenConvert.
//
// Every interesting transformation is delegated: raster re-encoding to the
// `image` crate, text layout to `printpdf`, office-document export to a
// headless LibreOffice process. The dispatcher's only job is to pick the
// pathway for an (input extension, target format) pair and to derive the
// output path. Rules are checked in a fixed priority order; first match wins.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use openconvert_core::AppConfig;
use openconvert_core::error::{ConvertError, Result};
use openconvert_core::types::{ConversionRequest, TargetFormat};

use crate::office::OfficeApp;

/// Raster extensions handled by the image pathway, both as input and output.
const IMAGE_EXTS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "bmp", "tiff"];

/// Word-processor family: exported by LibreOffice Writer.
const WORD_EXTS: [&str; 4] = ["doc", "docx", "rtf", "odt"];

/// Presentation family: exported by LibreOffice Impress.
const PRESENTATION_EXTS: [&str; 2] = ["ppt", "pptx"];

/// Spreadsheet family: exported by LibreOffice Calc (fixed-format export).
const SPREADSHEET_EXTS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Markup family: opened and exported by Writer. Markdown gets no special
/// rendering — it is treated as a plain document.
const MARKUP_EXTS: [&str; 3] = ["html", "htm", "md"];

/// A delegated external call chosen for an (extension, target) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pathway {
    /// Decode with the `image` crate, re-encode in the target format.
    ImageReencode,
    /// Render each input line as a PDF text line via `printpdf`.
    TextToPdf,
    /// Export through a headless LibreOffice application.
    OfficeExport(OfficeApp),
}

/// Select the pathway for an input extension and target format.
///
/// The rule order is fixed and first-match-wins; `None` means the pair is
/// unsupported and the caller must fail with `UnsupportedConversion`.
pub fn select_pathway(extension: &str, target: TargetFormat) -> Option<Pathway> {
    if IMAGE_EXTS.contains(&extension) && target.is_image() {
        return Some(Pathway::ImageReencode);
    }
    if extension == "txt" && target == TargetFormat::Pdf {
        return Some(Pathway::TextToPdf);
    }
    if WORD_EXTS.contains(&extension) && target == TargetFormat::Pdf {
        return Some(Pathway::OfficeExport(OfficeApp::Writer));
    }
    if PRESENTATION_EXTS.contains(&extension) && target == TargetFormat::Pdf {
        return Some(Pathway::OfficeExport(OfficeApp::Impress));
    }
    if SPREADSHEET_EXTS.contains(&extension) && target == TargetFormat::Pdf {
        return Some(Pathway::OfficeExport(OfficeApp::Calc));
    }
    if MARKUP_EXTS.contains(&extension) && target == TargetFormat::Pdf {
        return Some(Pathway::OfficeExport(OfficeApp::Writer));
    }
    None
}

/// Extensions accepted as input by at least one rule, in UI filter order.
pub fn supported_input_extensions() -> Vec<&'static str> {
    let mut exts = Vec::new();
    exts.extend(IMAGE_EXTS);
    exts.push("txt");
    exts.extend(WORD_EXTS);
    exts.extend(PRESENTATION_EXTS);
    exts.extend(SPREADSHEET_EXTS);
    exts.extend(MARKUP_EXTS);
    exts
}

/// Single-shot conversion dispatcher.
///
/// Holds the resolved configuration a conversion needs (office command,
/// default output directory) so the dispatch itself never consults ambient
/// state. One `convert` call performs one request; there is no queueing,
/// no retry, and no cleanup of partial output on failure.
#[derive(Debug, Clone)]
pub struct Converter {
    office_command: String,
    default_output_dir: Option<PathBuf>,
}

impl Converter {
    /// Build a converter from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            office_command: config.office_command.clone(),
            default_output_dir: config.default_output_dir.clone(),
        }
    }

    /// Build a converter with explicit values (used by tests and the bench).
    pub fn new(office_command: impl Into<String>, default_output_dir: Option<PathBuf>) -> Self {
        Self {
            office_command: office_command.into(),
            default_output_dir,
        }
    }

    /// Convert one file, returning the path of the produced output.
    ///
    /// Fails with `UnsupportedConversion` when no rule matches the pair, or
    /// with `ExternalTool` when the delegated library or application errors
    /// (missing input, corrupt document, LibreOffice unavailable). The rule
    /// table is consulted before the input is touched, so an unsupported
    /// pair reports `UnsupportedConversion` whether or not the file exists.
    /// A partially written output file may be left behind on failure.
    #[instrument(skip(self), fields(input = %request.input.display(), target = %request.target))]
    pub fn convert(&self, request: &ConversionRequest) -> Result<PathBuf> {
        let extension = request.input_extension();
        let output = request.output_path(self.default_output_dir.as_deref());

        let pathway = select_pathway(&extension, request.target).ok_or_else(|| {
            ConvertError::UnsupportedConversion {
                extension: extension.clone(),
                target: request.target.to_string(),
            }
        })?;

        if !request.input.is_file() {
            return Err(ConvertError::ExternalTool(format!(
                "input file not found: {}",
                request.input.display()
            )));
        }

        debug!(?pathway, output = %output.display(), "pathway selected");

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        match pathway {
            Pathway::ImageReencode => {
                crate::image::reencode(&request.input, &output, request.target)?;
            }
            Pathway::TextToPdf => {
                crate::text::render_file_to_pdf(&request.input, &output)?;
            }
            Pathway::OfficeExport(app) => {
                crate::office::export_to_pdf(&self.office_command, app, &request.input, &output)?;
            }
        }

        info!(output = %output.display(), "conversion complete");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_pairs_use_image_pathway() {
        for ext in IMAGE_EXTS {
            for target in [
                TargetFormat::Png,
                TargetFormat::Jpg,
                TargetFormat::Jpeg,
                TargetFormat::Webp,
                TargetFormat::Bmp,
                TargetFormat::Tiff,
            ] {
                assert_eq!(
                    select_pathway(ext, target),
                    Some(Pathway::ImageReencode),
                    "{ext} -> {target}"
                );
            }
        }
    }

    #[test]
    fn image_to_pdf_is_unsupported() {
        // There is no image→PDF rule; images only convert between raster
        // formats.
        assert_eq!(select_pathway("png", TargetFormat::Pdf), None);
    }

    #[test]
    fn txt_to_pdf_uses_text_pathway() {
        assert_eq!(
            select_pathway("txt", TargetFormat::Pdf),
            Some(Pathway::TextToPdf)
        );
        assert_eq!(select_pathway("txt", TargetFormat::Png), None);
    }

    #[test]
    fn office_families_route_to_their_application() {
        for ext in WORD_EXTS {
            assert_eq!(
                select_pathway(ext, TargetFormat::Pdf),
                Some(Pathway::OfficeExport(OfficeApp::Writer))
            );
        }
        for ext in PRESENTATION_EXTS {
            assert_eq!(
                select_pathway(ext, TargetFormat::Pdf),
                Some(Pathway::OfficeExport(OfficeApp::Impress))
            );
        }
        for ext in SPREADSHEET_EXTS {
            assert_eq!(
                select_pathway(ext, TargetFormat::Pdf),
                Some(Pathway::OfficeExport(OfficeApp::Calc))
            );
        }
    }

    #[test]
    fn markup_routes_through_writer() {
        for ext in MARKUP_EXTS {
            assert_eq!(
                select_pathway(ext, TargetFormat::Pdf),
                Some(Pathway::OfficeExport(OfficeApp::Writer))
            );
        }
    }

    #[test]
    fn office_inputs_never_become_images() {
        for ext in ["docx", "pptx", "xlsx", "html"] {
            assert_eq!(select_pathway(ext, TargetFormat::Png), None);
        }
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        assert_eq!(select_pathway("zip", TargetFormat::Pdf), None);
        assert_eq!(select_pathway("", TargetFormat::Png), None);
    }

    #[test]
    fn missing_input_is_external_tool_failure() {
        let converter = Converter::new("soffice", None);
        let request = ConversionRequest::new("/nonexistent/gone.txt", TargetFormat::Pdf);
        match converter.convert(&request) {
            Err(ConvertError::ExternalTool(msg)) => {
                assert!(msg.contains("input file not found"));
            }
            other => panic!("expected ExternalTool, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_pair_wins_over_missing_input() {
        // The rule table runs before the existence check, so an unsupported
        // pair is reported as such even when the file is also missing.
        let converter = Converter::new("soffice", None);
        let request = ConversionRequest::new("/nonexistent/archive.zip", TargetFormat::Pdf);
        match converter.convert(&request) {
            Err(ConvertError::UnsupportedConversion { extension, target }) => {
                assert_eq!(extension, "zip");
                assert_eq!(target, "pdf");
            }
            other => panic!("expected UnsupportedConversion, got {other:?}"),
        }
    }

    #[test]
    fn unsupported_pair_reports_extension_and_target() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("archive.zip");
        std::fs::write(&input, b"not really a zip").unwrap();

        let converter = Converter::new("soffice", None);
        let request = ConversionRequest::new(&input, TargetFormat::Pdf);
        match converter.convert(&request) {
            Err(ConvertError::UnsupportedConversion { extension, target }) => {
                assert_eq!(extension, "zip");
                assert_eq!(target, "pdf");
            }
            other => panic!("expected UnsupportedConversion, got {other:?}"),
        }
    }

    #[test]
    fn txt_converts_beside_input_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.txt");
        std::fs::write(&input, "line one\nline two\n").unwrap();

        let converter = Converter::new("soffice", None);
        let request = ConversionRequest::new(&input, TargetFormat::Pdf);
        let output = converter.convert(&request).unwrap();

        assert_eq!(output, dir.path().join("report.pdf"));
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn default_output_dir_from_config_is_used() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        let input = src.path().join("notes.txt");
        std::fs::write(&input, "hello\n").unwrap();

        let converter = Converter::new("soffice", Some(dst.path().to_path_buf()));
        let request = ConversionRequest::new(&input, TargetFormat::Pdf);
        let output = converter.convert(&request).unwrap();

        assert_eq!(output, dst.path().join("notes.pdf"));
        assert!(output.is_file());
    }

    #[test]
    fn office_pathway_with_missing_binary_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("slides.pptx");
        std::fs::write(&input, b"stub").unwrap();

        let converter = Converter::new("openconvert-test-missing-soffice", None);
        let request = ConversionRequest::new(&input, TargetFormat::Pdf);
        match converter.convert(&request) {
            Err(ConvertError::ExternalTool(msg)) => {
                assert!(msg.contains("openconvert-test-missing-soffice"), "{msg}");
            }
            other => panic!("expected ExternalTool, got {other:?}"),
        }
    }
}
