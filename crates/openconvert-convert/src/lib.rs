// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// openconvert-convert — the conversion engine for OpenConvert.
//
// Provides the dispatch table that maps (input extension, target format)
// pairs to a pathway, and the three pathway families: raster re-encoding
// (`image` crate), text-to-PDF rendering (`printpdf`), and office-document
// export through a headless LibreOffice process.

pub mod dispatch;
pub mod image;
pub mod office;
pub mod text;

// Re-export the primary types so callers can use `openconvert_convert::Converter` etc.
pub use dispatch::{Converter, Pathway, select_pathway};
pub use office::OfficeApp;
