//! App shell: owns the session controller and bridges it to the backend worker.

use std::{collections::HashMap, path::PathBuf, time::Duration};

use client_core::{Command, GenerationOutcome, SessionController, Settings};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::media::PreviewImage;

use super::theme;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_url: String,
    pub google_client_id: Option<String>,
    pub data_dir: PathBuf,
}

impl StartupConfig {
    pub fn from_settings(settings: &Settings) -> client_core::error::Result<Self> {
        Ok(Self {
            api_url: settings.api_url.clone(),
            google_client_id: settings.google_client_id.clone(),
            data_dir: settings.resolve_data_dir()?,
        })
    }
}

#[derive(Clone)]
pub(super) enum ImageSlot {
    Loading,
    Ready(egui::TextureHandle),
    Failed(String),
}

#[derive(Clone)]
pub(super) struct StatusBanner {
    pub(super) message: String,
}

pub struct ImageifyApp {
    pub(super) cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(super) controller: SessionController,
    pub(super) credential_input: String,
    pub(super) status: String,
    pub(super) status_banner: Option<StatusBanner>,
    pub(super) images: HashMap<String, ImageSlot>,
    pub(super) last_scrolled_revision: u64,
    theme_applied: bool,
}

impl ImageifyApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        controller: SessionController,
        startup_warning: Option<String>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller,
            credential_input: String::new(),
            status: "Starting...".to_string(),
            status_banner: startup_warning.map(|message| StatusBanner { message }),
            images: HashMap::new(),
            last_scrolled_revision: 0,
            theme_applied: false,
        }
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.status = message,
                UiEvent::Error(err) => self.report_error(err),
                UiEvent::Session(command) => {
                    if let Command::GenerationFinished {
                        outcome: GenerationOutcome::Failed(reason),
                        ..
                    } = &command
                    {
                        self.report_error(UiError::from_message(
                            UiErrorContext::Generate,
                            format!("Image generation failed: {reason}"),
                        ));
                    }
                    self.controller.dispatch(command);
                }
                UiEvent::ImageLoaded { url, image } => {
                    let texture = load_texture(ctx, &url, &image);
                    self.images.insert(url, ImageSlot::Ready(texture));
                }
                UiEvent::ImageFailed { url, reason } => {
                    self.report_error(UiError::from_message(
                        UiErrorContext::ImageFetch,
                        reason.clone(),
                    ));
                    self.images.insert(url, ImageSlot::Failed(reason));
                }
            }
        }
    }

    fn report_error(&mut self, err: UiError) {
        let message = format!("{} error: {}", err_label(err.category()), err.message());
        tracing::warn!(context = ?err.context(), "{message}");
        if err.is_prominent() {
            self.status_banner = Some(StatusBanner {
                message: message.clone(),
            });
        }
        self.status = message;
    }

    /// Returns the slot for `url`, queueing a fetch the first time it is seen.
    pub(super) fn image_slot(&mut self, url: &str) -> ImageSlot {
        if !self.images.contains_key(url) {
            let cmd = BackendCommand::FetchImage {
                url: url.to_string(),
            };
            let slot = match dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
                Ok(()) => ImageSlot::Loading,
                Err(reason) => ImageSlot::Failed(reason),
            };
            self.images.insert(url.to_string(), slot);
        }
        self.images[url].clone()
    }

    pub(super) fn try_login(&mut self) {
        let credential = self.credential_input.trim().to_string();
        if credential.is_empty() {
            self.controller.dispatch(Command::LoginFailed {
                reason: "no credential provided".to_string(),
            });
            self.status = "Paste a Google ID token to sign in".to_string();
            return;
        }

        self.controller.dispatch(Command::Login { credential });
        if self.controller.state().session.is_signed_in() {
            self.credential_input.clear();
            self.status = "Signed in".to_string();
        } else {
            self.report_error(UiError::from_message(
                UiErrorContext::Login,
                "Login failed: invalid identity token",
            ));
        }
    }

    pub(super) fn sign_out(&mut self) {
        self.controller.dispatch(Command::Logout);
        self.images.clear();
        self.status = "Signed out".to_string();
    }

    pub(super) fn edit_prompt(&mut self, text: String) {
        self.controller.dispatch(Command::EditPrompt(text));
    }

    pub(super) fn submit_prompt(&mut self) {
        let text = self.controller.state().prompt_input.clone();
        let Some(request) = self.controller.dispatch(Command::SubmitPrompt { text }) else {
            return;
        };

        let tag = request.tag;
        let cmd = BackendCommand::Generate {
            tag,
            prompt: request.prompt,
        };
        match dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            Ok(()) => self.status = "Generating...".to_string(),
            Err(reason) => {
                self.report_error(UiError::from_message(
                    UiErrorContext::Generate,
                    reason.clone(),
                ));
                // Resolve the placeholder now so the form does not stay locked.
                self.controller.dispatch(Command::GenerationFinished {
                    tag,
                    outcome: GenerationOutcome::Failed(reason),
                });
            }
        }
    }
}

fn load_texture(ctx: &egui::Context, url: &str, image: &PreviewImage) -> egui::TextureHandle {
    ctx.load_texture(
        format!("imageify:{url}"),
        egui::ColorImage::from_rgba_unmultiplied([image.width, image.height], &image.rgba),
        egui::TextureOptions::LINEAR,
    )
}

impl eframe::App for ImageifyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            theme::apply(ctx);
            self.theme_applied = true;
        }

        self.process_ui_events(ctx);

        let view = client_core::render(self.controller.state());
        self.show_header(ctx, &view);
        self.show_composer(ctx, &view);
        self.show_transcript(ctx, &view);

        let repaint_after = if self.controller.state().is_generating() {
            Duration::from_millis(33)
        } else {
            Duration::from_millis(100)
        };
        ctx.request_repaint_after(repaint_after);
    }
}
