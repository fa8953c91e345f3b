// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the OpenConvert file converter.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output formats the converter can produce. This is a closed set: the UI
/// dropdown, the request parser, and the dispatch table all agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFormat {
    Pdf,
    Png,
    Jpg,
    Jpeg,
    Webp,
    Bmp,
    Tiff,
}

impl TargetFormat {
    /// Every selectable target, in the order the UI presents them.
    pub const ALL: [TargetFormat; 7] = [
        Self::Pdf,
        Self::Png,
        Self::Jpg,
        Self::Jpeg,
        Self::Webp,
        Self::Bmp,
        Self::Tiff,
    ];

    /// Parse a lowercase format token ("pdf", "png", ...). Uppercase input
    /// is accepted and folded, matching what the format dropdown displays.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpg),
            "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    /// File extension appended to the output path (no leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Whether this target is a raster image format (everything but PDF).
    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Pdf)
    }

    /// Uppercase label for the UI dropdown.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Png => "PNG",
            Self::Jpg => "JPG",
            Self::Jpeg => "JPEG",
            Self::Webp => "WEBP",
            Self::Bmp => "BMP",
            Self::Tiff => "TIFF",
        }
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A single conversion request: one input file, one target format, and an
/// optional explicit output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub input: PathBuf,
    pub target: TargetFormat,
    /// Where to write the output. `None` falls back to the configured
    /// default directory, then to the input file's own directory.
    pub output_dir: Option<PathBuf>,
}

impl ConversionRequest {
    pub fn new(input: impl Into<PathBuf>, target: TargetFormat) -> Self {
        Self {
            input: input.into(),
            target,
            output_dir: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Lowercased extension of the input file, without the dot.
    pub fn input_extension(&self) -> String {
        self.input
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// Resolve the directory the output file will be written to.
    ///
    /// Precedence: the request's own `output_dir`, then the caller-supplied
    /// default (from `AppConfig`), then the input file's parent directory.
    /// The fallback chain is explicit so the dispatcher never consults
    /// ambient state.
    pub fn resolve_output_dir(&self, default_dir: Option<&Path>) -> PathBuf {
        if let Some(ref dir) = self.output_dir {
            return dir.clone();
        }
        if let Some(dir) = default_dir {
            return dir.to_path_buf();
        }
        self.input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The full output path: `{resolved_dir}/{input stem}.{target ext}`.
    ///
    /// An existing file at this path is silently overwritten; there is no
    /// collision handling.
    pub fn output_path(&self, default_dir: Option<&Path>) -> PathBuf {
        let stem = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".into());
        self.resolve_output_dir(default_dir)
            .join(format!("{stem}.{}", self.target.extension()))
    }
}

/// Lifecycle states of a conversion job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Created, not yet started.
    Pending,
    /// The worker is currently converting.
    Running,
    /// Conversion finished — see the job's output path.
    Completed,
    /// Conversion failed — see the job's error field.
    Failed,
}

/// One entry in the session's conversion history.
///
/// Jobs live only for the running session; nothing is persisted across
/// launches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionJob {
    pub id: JobId,
    /// Display name of the input file.
    pub input_name: String,
    pub target: TargetFormat,
    pub status: JobStatus,
    pub created: DateTime<Utc>,
    /// Path of the produced file, once completed.
    pub output_path: Option<PathBuf>,
    /// Failure message, once failed.
    pub error: Option<String>,
}

impl ConversionJob {
    pub fn new(request: &ConversionRequest) -> Self {
        let input_name = request
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| request.input.display().to_string());
        Self {
            id: JobId::new(),
            input_name,
            target: request.target,
            status: JobStatus::Pending,
            created: Utc::now(),
            output_path: None,
            error: None,
        }
    }

    pub fn complete(&mut self, output: PathBuf) {
        self.status = JobStatus::Completed;
        self.output_path = Some(output);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = JobStatus::Failed;
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_format_parses_lowercase_tokens() {
        assert_eq!(TargetFormat::parse("pdf"), Some(TargetFormat::Pdf));
        assert_eq!(TargetFormat::parse("JPEG"), Some(TargetFormat::Jpeg));
        assert_eq!(TargetFormat::parse("docx"), None);
    }

    #[test]
    fn target_format_roundtrips_through_extension() {
        for fmt in TargetFormat::ALL {
            assert_eq!(TargetFormat::parse(fmt.extension()), Some(fmt));
        }
    }

    #[test]
    fn output_dir_prefers_explicit_request_dir() {
        let req = ConversionRequest::new("/docs/report.txt", TargetFormat::Pdf)
            .with_output_dir("/out");
        assert_eq!(
            req.output_path(Some(Path::new("/default"))),
            PathBuf::from("/out/report.pdf")
        );
    }

    #[test]
    fn output_dir_falls_back_to_config_default() {
        let req = ConversionRequest::new("/docs/report.txt", TargetFormat::Pdf);
        assert_eq!(
            req.output_path(Some(Path::new("/default"))),
            PathBuf::from("/default/report.pdf")
        );
    }

    #[test]
    fn output_dir_falls_back_to_input_parent() {
        let req = ConversionRequest::new("/docs/photo.png", TargetFormat::Jpg);
        assert_eq!(req.output_path(None), PathBuf::from("/docs/photo.jpg"));
    }

    #[test]
    fn input_extension_is_lowercased() {
        let req = ConversionRequest::new("/docs/SLIDES.PPTX", TargetFormat::Pdf);
        assert_eq!(req.input_extension(), "pptx");
    }

    #[test]
    fn job_records_outcome() {
        let req = ConversionRequest::new("/docs/report.txt", TargetFormat::Pdf);
        let mut job = ConversionJob::new(&req);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.input_name, "report.txt");

        job.complete(PathBuf::from("/docs/report.pdf"));
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.error.is_none());

        let mut failed = ConversionJob::new(&req);
        failed.fail("soffice not found");
        assert_eq!(failed.status, JobStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("soffice not found"));
    }
}
