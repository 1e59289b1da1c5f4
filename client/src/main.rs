//! `franchise` entry-point: loads settings, wires the HTTP backend into the
//! services and runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use franchise_client::config::ClientSettings;
use franchise_client::domain::SessionContext;
use franchise_client::inbound::cli::{Cli, CliRunner, resolve_identity};
use franchise_client::outbound::http::HttpBackend;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use reqwest::Url;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> io::Result<()> {
    let settings = ClientSettings::load_from_iter([OsString::from("franchise")])
        .map_err(|error| io::Error::other(format!("load configuration: {error}")))?;
    init_tracing(settings.log_json);

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main(cli, settings))
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

async fn async_main(cli: Cli, settings: ClientSettings) -> io::Result<()> {
    let base_url = match cli.base_url.as_deref() {
        Some(raw) => Url::parse(raw),
        None => settings.base_url(),
    }
    .map_err(|error| io::Error::other(format!("invalid backend URL: {error}")))?;
    let identity = resolve_identity(&cli, &settings).map_err(io::Error::other)?;

    let backend = match settings.user_agent.clone() {
        Some(user_agent) => HttpBackend::with_user_agent(base_url, settings.timeout(), user_agent),
        None => HttpBackend::new(base_url, settings.timeout()),
    }
    .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;

    let session = identity.map_or_else(SessionContext::anonymous, SessionContext::with_identity);
    let runner = CliRunner::new(
        Arc::new(backend),
        session,
        Arc::new(DefaultClock),
        settings.first_page(),
    );

    let output = runner.run(cli.command).await.map_err(io::Error::other)?;
    println!("{output}");
    Ok(())
}
