// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// History page — the session's conversion jobs, newest first. Nothing here
// is persisted; closing the app clears the list.

use dioxus::prelude::*;

use openconvert_core::types::{ConversionJob, JobStatus};

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Jobs() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    rsx! {
        div {
            div { style: "display: flex; justify-content: space-between; align-items: center;",
                h1 { "History" }
                button {
                    style: "padding: 6px 16px; border-radius: 6px; border: 1px solid #ccc; background: white; font-size: 13px;",
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            svc.clear_jobs();
                            state.write().jobs = Vec::new();
                        }
                    },
                    "Clear"
                }
            }

            if state.read().jobs.is_empty() {
                p { style: "color: #888; margin-top: 24px;",
                    "No conversions yet this session."
                }
            } else {
                for job in state.read().jobs.clone() {
                    JobRow { key: "{job.id}", job }
                }
            }
        }
    }
}

#[component]
fn JobRow(job: ConversionJob) -> Element {
    let (status, status_color) = match job.status {
        JobStatus::Pending => ("Pending", "#888888"),
        JobStatus::Running => ("Converting", "#007aff"),
        JobStatus::Completed => ("Done", "#155724"),
        JobStatus::Failed => ("Failed", "#721c24"),
    };
    let created = job.created.format("%H:%M:%S").to_string();

    rsx! {
        div { style: "padding: 12px; border-bottom: 1px solid #f0f0f0;",
            div { style: "display: flex; justify-content: space-between;",
                span { style: "font-weight: bold;",
                    "{job.input_name} \u{2192} {job.target.label()}"
                }
                span { style: "color: {status_color}; font-size: 13px;", "{status}" }
            }
            p { style: "color: #888; font-size: 12px; margin: 4px 0 0 0;", "{created}" }
            if let Some(ref output) = job.output_path {
                p { style: "color: #155724; font-size: 12px; margin: 4px 0 0 0;",
                    "{output.display()}"
                }
            }
            if let Some(ref error) = job.error {
                p { style: "color: #721c24; font-size: 12px; margin: 4px 0 0 0;",
                    "{error}"
                }
            }
        }
    }
}
