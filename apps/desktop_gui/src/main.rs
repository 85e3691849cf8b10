mod backend_bridge;
mod controller;
mod media;
mod ui;

use std::{path::PathBuf, sync::Arc};

use anyhow::anyhow;
use clap::Parser;
use client_core::{
    load_settings, normalize_api_url, Command, FileSessionStore, GoogleIdentityProvider,
    MemorySessionStore, SessionController, SessionStore,
};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{ImageifyApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "imageify", about = "Imageify desktop client")]
struct Args {
    /// Base URL of the generation API.
    #[arg(long)]
    api_url: Option<String>,
    /// Directory holding the persisted session.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    google_client_id: Option<String>,
}

fn open_session_store(config: &StartupConfig) -> (Box<dyn SessionStore>, Option<String>) {
    match FileSessionStore::open_in_dir(&config.data_dir) {
        Ok(store) => {
            tracing::info!(path = %store.path().display(), "using persisted session store");
            (Box::new(store), None)
        }
        Err(err) => {
            tracing::warn!("falling back to in-memory session store: {err}");
            (
                Box::new(MemorySessionStore::new()),
                Some(format!(
                    "Session will not be remembered after closing the app: {err}"
                )),
            )
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = normalize_api_url(&api_url)?;
    }
    if let Some(data_dir) = args.data_dir {
        settings.data_dir = Some(data_dir);
    }
    if let Some(client_id) = args.google_client_id {
        settings.google_client_id = Some(client_id);
    }
    let config = StartupConfig::from_settings(&settings)?;
    tracing::info!(api_url = %config.api_url, "starting imageify desktop");

    let (store, startup_warning) = open_session_store(&config);
    let identity = Arc::new(GoogleIdentityProvider::new(config.google_client_id.clone()));
    let mut controller = SessionController::new(store, identity);
    controller.dispatch(Command::RestoreSession);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(config.api_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Imageify")
            .with_inner_size([900.0, 760.0])
            .with_min_inner_size([520.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Imageify",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ImageifyApp::new(
                cmd_tx,
                ui_rx,
                controller,
                startup_warning,
            )))
        }),
    )
    .map_err(|err| anyhow!("desktop ui exited with error: {err}"))
}
