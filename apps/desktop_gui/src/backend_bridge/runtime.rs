//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{run_generation, GenerationClient, GenerationRequest, HttpGenerationClient};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media;

/// Spawns the backend worker thread. Each queued command runs as its own task
/// so slow generations never block image fetches.
pub fn launch(api_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let http = reqwest::Client::new();
            let generation: Arc<dyn GenerationClient> = Arc::new(
                HttpGenerationClient::with_http_client(http.clone(), api_url),
            );
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            // `recv` blocks this thread; spawned tasks keep running on the pool.
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Generate { tag, prompt } => {
                        let generation = Arc::clone(&generation);
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let finished =
                                run_generation(generation.as_ref(), GenerationRequest { tag, prompt })
                                    .await;
                            // The controller must always see the completion, so block on a full queue.
                            if ui_tx.send(UiEvent::Session(finished)).is_err() {
                                tracing::warn!(tag = tag.0, "ui closed before generation finished");
                            }
                        });
                    }
                    BackendCommand::FetchImage { url } => {
                        let http = http.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let event = match media::load_preview(&http, &url).await {
                                Ok(image) => UiEvent::ImageLoaded { url, image },
                                Err(reason) => {
                                    tracing::warn!(%url, "image load failed: {reason}");
                                    UiEvent::ImageFailed { url, reason }
                                }
                            };
                            // The slot stays loading until this event is delivered.
                            if ui_tx.send(event).is_err() {
                                tracing::warn!("ui closed before image load finished");
                            }
                        });
                    }
                }
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}
