// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — owns the configuration and the session job list,
// and runs conversions off the UI thread.
//
// A conversion is blocking work (image codecs, PDF generation, waiting on a
// LibreOffice process), so it runs on `tokio::task::spawn_blocking`. Only a
// single request is ever in flight: the UI disables the Convert button until
// the current one resolves.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use openconvert_core::AppConfig;
use openconvert_core::error::{ConvertError, Result};
use openconvert_core::types::{ConversionJob, ConversionRequest, JobId, JobStatus};
use openconvert_convert::Converter;
use tracing::{error, info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<Mutex<AppConfig>>,
    jobs: Arc<Mutex<Vec<ConversionJob>>>,
    data_dir: Option<PathBuf>,
}

impl AppServices {
    /// Initialise all services.  Call once at app startup.
    ///
    /// Creates the data directory and loads the persisted configuration, if
    /// any.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir)?;

        Ok(Self {
            config: Arc::new(Mutex::new(config)),
            jobs: Arc::new(Mutex::new(Vec::new())),
            data_dir: Some(dir),
        })
    }

    /// In-memory fallback when the data directory is unusable. Settings are
    /// not persisted in this mode.
    pub fn fallback() -> Self {
        warn!("running without persistent settings");
        Self {
            config: Arc::new(Mutex::new(AppConfig::default())),
            jobs: Arc::new(Mutex::new(Vec::new())),
            data_dir: None,
        }
    }

    // -- Configuration -------------------------------------------------------

    /// Snapshot of the current configuration.
    pub fn config(&self) -> AppConfig {
        self.config.lock().expect("config lock poisoned").clone()
    }

    /// Persist and apply a new configuration.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(ref dir) = self.data_dir {
            let json = serde_json::to_string_pretty(config)?;
            std::fs::write(dir.join(CONFIG_FILE), json)?;
        }
        *self.config.lock().expect("config lock poisoned") = config.clone();
        info!("configuration saved");
        Ok(())
    }

    // -- Conversion ----------------------------------------------------------

    /// Run one conversion request to completion on a blocking worker.
    ///
    /// Records the job in the session history, dispatches through the
    /// engine, and updates the job with the outcome. Returns the output
    /// path on success. There is no cancellation and no timeout; a hung
    /// LibreOffice export blocks the worker until it exits.
    pub async fn convert_file(&self, request: ConversionRequest) -> Result<PathBuf> {
        let mut job = ConversionJob::new(&request);
        job.status = JobStatus::Running;
        let job_id = job.id;
        {
            let mut jobs = self.jobs.lock().expect("jobs lock poisoned");
            jobs.insert(0, job);
        }

        let converter = Converter::from_config(&self.config());
        let req = request.clone();

        let result = match tokio::task::spawn_blocking(move || converter.convert(&req)).await {
            Ok(result) => result,
            Err(e) => Err(ConvertError::ExternalTool(format!(
                "conversion worker failed: {e}"
            ))),
        };

        match &result {
            Ok(output) => {
                info!(job_id = %job_id, output = %output.display(), "conversion succeeded");
                self.update_job(job_id, |job| job.complete(output.clone()));
            }
            Err(e) => {
                error!(job_id = %job_id, error = %e, "conversion failed");
                let msg = e.to_string();
                self.update_job(job_id, |job| job.fail(msg.clone()));
            }
        }

        result
    }

    // -- Job history ---------------------------------------------------------

    /// Snapshot of the session's conversion history, newest first.
    pub fn all_jobs(&self) -> Vec<ConversionJob> {
        self.jobs.lock().expect("jobs lock poisoned").clone()
    }

    /// Drop all history entries.
    pub fn clear_jobs(&self) {
        self.jobs.lock().expect("jobs lock poisoned").clear();
    }

    fn update_job(&self, job_id: JobId, apply: impl FnOnce(&mut ConversionJob)) {
        let mut jobs = self.jobs.lock().expect("jobs lock poisoned");
        if let Some(job) = jobs.iter_mut().find(|j| j.id == job_id) {
            apply(job);
        }
    }
}

/// Load the persisted configuration, falling back to defaults when the file
/// does not exist yet.
fn load_config(dir: &std::path::Path) -> Result<AppConfig> {
    let path = dir.join(CONFIG_FILE);
    match std::fs::read_to_string(&path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(e.into()),
    }
}
