// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — persistent app configuration.

use dioxus::prelude::*;

use openconvert_core::types::TargetFormat;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Output" }
                // Default output directory
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Default output folder" }
                    div { style: "display: flex; align-items: center; gap: 8px;",
                        span { style: "color: #888; font-size: 13px;",
                            if let Some(ref dir) = state.read().config.default_output_dir {
                                "{dir.display()}"
                            } else {
                                "Same as input file"
                            }
                        }
                        button {
                            style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;",
                            onclick: move |_| {
                                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                                    state.write().config.default_output_dir = Some(dir);
                                }
                            },
                            "Choose"
                        }
                        if state.read().config.default_output_dir.is_some() {
                            button {
                                style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;",
                                onclick: move |_| {
                                    state.write().config.default_output_dir = None;
                                },
                                "Reset"
                            }
                        }
                    }
                }
                // Default target format
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "Default output format" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: state.read().config.default_target.label(),
                        onchange: move |evt| {
                            if let Some(fmt) = TargetFormat::parse(&evt.value()) {
                                state.write().config.default_target = fmt;
                            }
                        },
                        for fmt in TargetFormat::ALL {
                            option { value: fmt.label(), "{fmt.label()}" }
                        }
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Office Conversion" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "LibreOffice command" }
                    input {
                        r#type: "text",
                        style: "width: 260px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: "{state.read().config.office_command}",
                        onchange: move |evt| {
                            let value = evt.value().trim().to_string();
                            if !value.is_empty() {
                                state.write().config.office_command = value;
                            }
                        },
                    }
                }
                p { style: "color: #888; font-size: 12px;",
                    "Converting DOC, DOCX, RTF, ODT, PPT, PPTX, XLS, XLSX, CSV, HTML, and MD files needs LibreOffice. Set the full path to soffice if it isn't on PATH."
                }
            }

            // Save button
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                save_msg.set(Some("Settings saved.".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("Save failed: {e}")));
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }
        }
    }
}
