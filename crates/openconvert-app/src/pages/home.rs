// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Convert page — pick a file, choose a target format and (optionally) an
// output folder, convert. Three steps, one button.
//
// Only one conversion is ever in flight; the Convert button stays disabled
// until the current request resolves. Progress is stage-based and
// indeterminate, since the delegated libraries report no real percentages.

use std::path::PathBuf;

use dioxus::prelude::*;

use openconvert_core::human_errors::humanize_error;
use openconvert_core::types::{ConversionRequest, TargetFormat};
use openconvert_convert::dispatch::supported_input_extensions;

use crate::services::app_services::AppServices;
use crate::state::{AppState, ConvertStage};

#[component]
pub fn Home() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut input_path = use_signal(|| Option::<PathBuf>::None);
    let mut output_dir = use_signal(|| Option::<PathBuf>::None);
    let mut target = use_signal(|| state.read().config.default_target);
    let mut stage = use_signal(|| ConvertStage::Idle);
    let mut result_msg = use_signal(|| Option::<(String, String)>::None);

    let in_flight = stage.read().in_flight();
    let ready = input_path.read().is_some() && !in_flight;

    rsx! {
        div {
            h1 { "OpenConvert" }
            p { style: "color: #666; margin-top: -8px;", "Simple. Fast. Open Source." }
            p { style: "color: #888; font-size: 12px;",
                "Images: PNG, JPG, JPEG, WEBP, BMP, TIFF. Documents to PDF: TXT, DOC, DOCX, RTF, ODT, PPT, PPTX, XLS, XLSX, CSV, HTML, MD."
            }

            // File selection
            section { style: "margin: 16px 0;",
                h3 { "1. Select File" }
                if let Some(ref path) = *input_path.read() {
                    div { style: "display: flex; align-items: center; gap: 8px;",
                        p { "Selected: {path.display()}" }
                        button {
                            style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;",
                            disabled: in_flight,
                            onclick: move |_| {
                                input_path.set(None);
                                result_msg.set(None);
                                stage.set(ConvertStage::Idle);
                            },
                            "Clear"
                        }
                    }
                } else {
                    button {
                        style: "padding: 12px 24px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 16px;",
                        onclick: move |_| {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("Convertible files", &supported_input_extensions())
                                .pick_file()
                            {
                                tracing::info!(file = %path.display(), "input selected");
                                input_path.set(Some(path));
                                result_msg.set(None);
                                stage.set(ConvertStage::Idle);
                            }
                        },
                        "Browse..."
                    }
                }
            }

            // Output format
            section { style: "margin: 16px 0;",
                h3 { "2. Output Format" }
                select {
                    style: "padding: 6px 12px; border: 1px solid #ccc; border-radius: 4px; min-width: 120px;",
                    value: target.read().label(),
                    onchange: move |evt| {
                        if let Some(fmt) = TargetFormat::parse(&evt.value()) {
                            target.set(fmt);
                        }
                    },
                    for fmt in TargetFormat::ALL {
                        option { value: fmt.label(), "{fmt.label()}" }
                    }
                }
            }

            // Save location
            section { style: "margin: 16px 0;",
                h3 { "3. Save Location" }
                div { style: "display: flex; align-items: center; gap: 8px;",
                    if let Some(ref dir) = *output_dir.read() {
                        p { "{dir.display()}" }
                        button {
                            style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;",
                            disabled: in_flight,
                            onclick: move |_| output_dir.set(None),
                            "Use default"
                        }
                    } else {
                        p { style: "color: #888;",
                            if state.read().config.default_output_dir.is_some() {
                                "Default: configured output folder (see Settings)"
                            } else {
                                "Default: same folder as the input file"
                            }
                        }
                        button {
                            style: "padding: 4px 12px; border-radius: 4px; border: 1px solid #ccc; background: white; font-size: 12px;",
                            disabled: in_flight,
                            onclick: move |_| {
                                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                                    output_dir.set(Some(dir));
                                }
                            },
                            "Choose folder"
                        }
                    }
                }
            }

            // Progress banner
            if *stage.read() != ConvertStage::Idle {
                StageBanner { stage: *stage.read(), detail: result_msg.read().clone() }
            }

            // Convert button
            button {
                style: "width: 100%; padding: 14px; border-radius: 10px; border: none; background: #007aff; color: white; font-size: 18px; font-weight: bold;",
                disabled: !ready,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let Some(input) = input_path.read().clone() else {
                            return;
                        };
                        let fmt = *target.read();
                        let dir = output_dir.read().clone();

                        stage.set(ConvertStage::Preparing);
                        result_msg.set(None);

                        let svc = svc.clone();
                        spawn(async move {
                            let mut request = ConversionRequest::new(input, fmt);
                            if let Some(dir) = dir {
                                request = request.with_output_dir(dir);
                            }

                            stage.set(ConvertStage::Converting);
                            match svc.convert_file(request).await {
                                Ok(output) => {
                                    stage.set(ConvertStage::Complete);
                                    result_msg.set(Some((
                                        "Saved.".into(),
                                        output.display().to_string(),
                                    )));
                                }
                                Err(e) => {
                                    let human = humanize_error(&e);
                                    stage.set(ConvertStage::Failed);
                                    result_msg.set(Some((human.message, human.suggestion)));
                                }
                            }
                            state.write().jobs = svc.all_jobs();
                        });
                    }
                },
                if in_flight { "Converting..." } else { "Convert File" }
            }
        }
    }
}

/// Stage banner with the indeterminate progress message and, once the
/// request resolves, the humanized outcome.
#[component]
fn StageBanner(stage: ConvertStage, detail: Option<(String, String)>) -> Element {
    let bg = stage.bg();
    let color = stage.color();
    let message = stage.message();

    rsx! {
        div {
            style: "padding: 12px; border-radius: 8px; margin: 16px 0; background: {bg}; color: {color};",
            p { style: "font-weight: bold; margin: 0;", "{message}" }
            if let Some((ref heading, ref body)) = detail {
                p { style: "margin: 8px 0 0 0;", "{heading}" }
                p { style: "margin: 4px 0 0 0; font-size: 13px;", "{body}" }
            }
        }
    }
}
