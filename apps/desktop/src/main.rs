use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, normalize_api_url, render, submit_and_wait, view::ChatView, Command,
    FileSessionStore, GoogleIdentityProvider, HttpGenerationClient, RowView, SessionController,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "imageify", about = "Headless Imageify client")]
struct Args {
    /// Base URL of the generation API.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Directory holding the persisted session.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    google_client_id: Option<String>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Sign in with a Google ID token.
    Login {
        #[arg(long, conflicts_with = "credential_file")]
        credential: Option<String>,
        #[arg(long)]
        credential_file: Option<PathBuf>,
    },
    Logout,
    /// Print the stored session.
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Generate one image from a prompt.
    Generate { prompt: String },
}

fn read_credential(credential: Option<String>, credential_file: Option<PathBuf>) -> Result<String> {
    let raw = match (credential, credential_file) {
        (Some(credential), _) => credential,
        (None, Some(path)) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read credential file '{}'", path.display()))?,
        (None, None) => bail!("pass --credential or --credential-file"),
    };
    Ok(raw.trim().to_string())
}

fn print_status(view: &ChatView, json: bool) -> Result<()> {
    let account = view.header.account.as_ref();
    if json {
        let status = serde_json::json!({
            "signed_in": !view.show_sign_in,
            "display_name": account.map(|a| a.display_name.clone()),
            "attempts_banner": view.header.attempts_banner,
            "submit_label": view.composer.submit_label,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    match (account, &view.header.attempts_banner) {
        (Some(account), Some(banner)) => println!("{}: {banner}", account.display_name),
        _ => println!("not signed in"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
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

    let data_dir = settings.resolve_data_dir()?;
    let store = FileSessionStore::open_in_dir(&data_dir)?;
    let identity = Arc::new(GoogleIdentityProvider::new(settings.google_client_id.clone()));
    let mut controller = SessionController::new(Box::new(store), identity);
    controller.dispatch(Command::RestoreSession);

    match args.command {
        CliCommand::Login {
            credential,
            credential_file,
        } => {
            let credential = read_credential(credential, credential_file)?;
            if credential.is_empty() {
                controller.dispatch(Command::LoginFailed {
                    reason: "empty credential".to_string(),
                });
                bail!("credential is empty");
            }
            controller.dispatch(Command::Login { credential });
            if !controller.state().session.is_signed_in() {
                bail!("login failed: identity token could not be decoded");
            }
            print_status(&render(controller.state()), false)?;
        }
        CliCommand::Logout => {
            controller.dispatch(Command::Logout);
            println!("signed out");
        }
        CliCommand::Status { json } => print_status(&render(controller.state()), json)?,
        CliCommand::Generate { prompt } => {
            let view = render(controller.state());
            if !view.composer.submit_enabled {
                bail!("cannot generate: {}", view.composer.submit_label);
            }

            let generation = HttpGenerationClient::new(settings.api_url.clone());
            tracing::info!(endpoint = %generation.endpoint(), "submitting prompt");
            if !submit_and_wait(&mut controller, &generation, prompt).await {
                bail!("prompt was not submitted");
            }

            let view = render(controller.state());
            for row in &view.rows {
                match row {
                    RowView::User { text } => println!("> {text}"),
                    RowView::BotImage { url } => println!("{url}"),
                    RowView::BotText { text } => eprintln!("{text}"),
                    RowView::BotPending => eprintln!("generation did not resolve"),
                }
            }
            if !matches!(view.rows.last(), Some(RowView::BotImage { .. })) {
                bail!("no image was generated");
            }
            if let Some(banner) = &view.header.attempts_banner {
                eprintln!("{banner}");
            }
        }
    }

    Ok(())
}
