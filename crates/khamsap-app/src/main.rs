use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use khamsap_config::Config;
use khamsap_lang_thai::ThaiLanguage;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::controller::AppController;
use crate::speech::{SpeechState, open_device};
use crate::state::AppState;

pub mod controller;
pub mod events;
pub mod io;
pub mod speech;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

/// Browse Chinese-Thai vocabulary and hear the Thai read aloud.
#[derive(Debug, Parser)]
#[command(name = "khamsap", version)]
struct Args {
    /// Entry list: a JSON file path or an http(s) URL
    #[arg(long)]
    data: Option<String>,

    /// Config file; missing files fall back to defaults
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Topic to show first
    #[arg(long)]
    topic: Option<String>,

    /// Search text to start with
    #[arg(long)]
    search: Option<String>,

    /// Log utterances instead of speaking them
    #[arg(long)]
    dry_run: bool,

    /// Log filter, e.g. "debug" or "khamsap_speech=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let loaded = Config::load(&args.config);
    let mut config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::new(),
    };
    if let Some(data) = &args.data {
        config.data.source = data.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config.log_json |= args.log_json;

    init_tracing(&config.log_level, config.log_json);
    if let Err(e) = &loaded {
        tracing::warn!("Ignoring {}: {}", args.config.display(), e);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(args, config));
    // stdin is read on a blocking thread that cannot be interrupted
    runtime.shutdown_timeout(Duration::from_millis(200));

    result
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    tracing::info!(
        source = %config.data.source,
        program = %config.speech.program,
        pacing = ?config.speech.pacing,
        "Starting khamsap"
    );

    let (speech, playback_events) = match open_device(&config.speech, args.dry_run).await {
        Ok(device) => {
            let (speech, events) = SpeechState::available(device, &config.speech, &ThaiLanguage);
            (speech, Some(events))
        }
        Err(e) => (SpeechState::unsupported(e.to_string()), None),
    };

    let state = Arc::new(
        AppState::new(config, speech)
            .with_filter(args.topic.as_deref(), args.search.as_deref())
            .await,
    );

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(playback_events);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => match result {
            Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
            Ok(Err(e)) => tracing::error!("Task failed: {:#}", e),
            Err(e) => tracing::error!("Task panicked: {}", e),
        },
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let ansi = atty::is(atty::Stream::Stderr);
    let (text, json) = if json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (
            Some(fmt::layer().with_ansi(ansi).with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}
