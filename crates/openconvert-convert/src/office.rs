// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Office export pathway — drive a headless LibreOffice process as an
// out-of-process export server.
//
// One LibreOffice instance is launched and torn down per conversion. That is
// slow and stateful at the OS level, but the export itself is entirely
// delegated: Writer, Impress, and Calc own the layout, we only pick the
// fixed-format export filter and the output directory.
//
// No timeout is applied to the export call; a hung LibreOffice blocks the
// worker thread (never the UI thread) until it exits.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use tracing::{info, instrument, warn};

use openconvert_core::error::{ConvertError, Result};

/// Which LibreOffice application performs the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfficeApp {
    /// Word-processing documents and HTML/Markdown markup.
    Writer,
    /// Presentations.
    Impress,
    /// Spreadsheets (fixed-format export).
    Calc,
}

impl OfficeApp {
    /// LibreOffice's PDF export filter name for this application — the
    /// fixed-format export code, equivalent to the numeric format codes of
    /// desktop automation APIs.
    pub fn export_filter(&self) -> &'static str {
        match self {
            Self::Writer => "writer_pdf_Export",
            Self::Impress => "impress_pdf_Export",
            Self::Calc => "calc_pdf_Export",
        }
    }

    /// Human-readable application name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Writer => "Writer",
            Self::Impress => "Impress",
            Self::Calc => "Calc",
        }
    }
}

impl std::fmt::Display for OfficeApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments for one headless export invocation.
///
/// LibreOffice writes `{input stem}.pdf` into `outdir`, which matches the
/// dispatcher's derived output path exactly.
pub fn export_args(app: OfficeApp, input: &Path, outdir: &Path) -> Vec<OsString> {
    vec![
        OsString::from("--headless"),
        OsString::from("--norestore"),
        OsString::from("--convert-to"),
        OsString::from(format!("pdf:{}", app.export_filter())),
        OsString::from("--outdir"),
        outdir.as_os_str().to_os_string(),
        input.as_os_str().to_os_string(),
    ]
}

/// Scoped handle to a running LibreOffice export process.
///
/// The process handle is released on every exit path: `wait` reaps it on the
/// normal path, and `Drop` kills a still-running child if the session is
/// abandoned early (for example when an error unwinds past it). This closes
/// the leak the desktop-automation pattern is prone to, where the server
/// keeps running when the export call itself fails.
#[derive(Debug)]
pub struct OfficeSession {
    child: Option<Child>,
    app: OfficeApp,
}

impl OfficeSession {
    /// Spawn the export process.
    ///
    /// A missing or non-executable `command` is the "automation server
    /// unavailable" case and maps to `ExternalTool`.
    #[instrument(skip_all, fields(app = %app, input = %input.display()))]
    pub fn launch(command: &str, app: OfficeApp, input: &Path, outdir: &Path) -> Result<Self> {
        let child = Command::new(command)
            .args(export_args(app, input, outdir))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                ConvertError::ExternalTool(format!("failed to launch {command}: {err}"))
            })?;

        info!(app = %app, pid = child.id(), "export process launched");
        Ok(Self {
            child: Some(child),
            app,
        })
    }

    /// Wait for the export to finish, consuming the session.
    ///
    /// Blocks without timeout. A non-zero exit status is reported with the
    /// process's stderr attached.
    pub fn wait(mut self) -> Result<()> {
        // Taken here so Drop has nothing left to kill on this path.
        let child = self
            .child
            .take()
            .ok_or_else(|| ConvertError::ExternalTool("export process already reaped".into()))?;

        let output = child.wait_with_output().map_err(|err| {
            ConvertError::ExternalTool(format!("failed to wait for export process: {err}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::ExternalTool(format!(
                "{} export exited with {}: {}",
                self.app,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Drop for OfficeSession {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            match child.try_wait() {
                Ok(Some(_)) => {}
                _ => {
                    warn!(app = %self.app, pid = child.id(), "killing abandoned export process");
                    let _ = child.kill();
                    let _ = child.wait();
                }
            }
        }
    }
}

/// Export `input` as PDF into the directory of `output` via the given
/// LibreOffice application, then verify the expected file exists.
pub fn export_to_pdf(command: &str, app: OfficeApp, input: &Path, output: &Path) -> Result<()> {
    let outdir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let session = OfficeSession::launch(command, app, input, outdir)?;
    session.wait()?;

    // LibreOffice reports success but writes nothing for some damaged
    // inputs; a missing output file is still a failure.
    if !output.is_file() {
        return Err(ConvertError::ExternalTool(format!(
            "{app} export produced no output at {}",
            output.display()
        )));
    }

    Ok(())
}
