// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text-to-PDF pathway — render a plain-text file as a PDF using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.
//
// Layout contract: one rendered PDF text line per input line, in original
// order, from a fixed left/top margin. printpdf performs no page overflow of
// its own, so page breaks are emitted explicitly once the cursor reaches the
// bottom margin. Lines are NOT wrapped: a line wider than the page extends
// past the right margin and is clipped by the viewer.

use std::path::Path;

use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
};
use tracing::{debug, instrument};

use openconvert_core::error::{ConvertError, Result};

// A4 in printpdf units.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;

const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_PT: f32 = 14.0;
const MARGIN_LEFT_PT: f32 = 40.0;
const MARGIN_TOP_PT: f32 = 40.0;
const MARGIN_BOTTOM_PT: f32 = 40.0;

/// Lines that fit on one page between the top and bottom margins.
fn lines_per_page() -> usize {
    let page_h_pt = Mm(PAGE_HEIGHT_MM).into_pt().0;
    ((page_h_pt - MARGIN_TOP_PT - MARGIN_BOTTOM_PT) / LINE_HEIGHT_PT).max(1.0) as usize
}

/// Lay the input lines out as per-page op lists: one `WriteTextBuiltinFont`
/// per input line, in original order, breaking to a fresh page when the
/// cursor reaches the bottom margin.
fn layout_pages(lines: &[&str]) -> Vec<Vec<Op>> {
    let page_h_pt = Mm(PAGE_HEIGHT_MM).into_pt().0;
    let mut pages: Vec<Vec<Op>> = Vec::new();

    for chunk in lines.chunks(lines_per_page()) {
        let mut ops: Vec<Op> = Vec::new();

        for (line_idx, line) in chunk.iter().enumerate() {
            let y_pt = page_h_pt - MARGIN_TOP_PT - (line_idx as f32 * LINE_HEIGHT_PT);

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(MARGIN_LEFT_PT),
                    y: Pt(y_pt),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(FONT_SIZE_PT),
                font: BuiltinFont::Helvetica,
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text((*line).to_string())],
                font: BuiltinFont::Helvetica,
            });
            ops.push(Op::EndTextSection);
        }

        pages.push(ops);
    }

    // An empty input still yields a valid single-page document.
    if pages.is_empty() {
        pages.push(Vec::new());
    }

    pages
}

/// Render plain text as PDF bytes, one text line per input line.
#[instrument(skip(text), fields(text_len = text.len()))]
pub fn render_text_pdf(title: &str, text: &str) -> Vec<u8> {
    let page_w = Mm(PAGE_WIDTH_MM);
    let page_h = Mm(PAGE_HEIGHT_MM);

    // Trailing whitespace (including the \r of CRLF files) is trimmed per
    // line; leading whitespace is preserved.
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();

    let pages: Vec<PdfPage> = layout_pages(&lines)
        .into_iter()
        .map(|ops| PdfPage::new(page_w, page_h, ops))
        .collect();

    debug!(
        total_lines = lines.len(),
        pages = pages.len(),
        "text layout complete"
    );

    let mut doc = PdfDocument::new(title);
    doc.with_pages(pages);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    doc.save(&PdfSaveOptions::default(), &mut warnings)
}

/// Read a UTF-8 text file and write it out as a PDF.
///
/// A non-UTF-8 or unreadable input counts as a tool failure, same as a
/// corrupt image would.
pub fn render_file_to_pdf(input: &Path, output: &Path) -> Result<()> {
    let text = std::fs::read_to_string(input).map_err(|err| {
        ConvertError::ExternalTool(format!("failed to read {}: {err}", input.display()))
    })?;

    let title = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Document".into());

    let bytes = render_text_pdf(&title, &text);
    std::fs::write(output, &bytes)?;
    Ok(())
}
