//! Binary entrypoint for the gallery.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use gallery_slideshow::config::{Configuration, DataSource};
use gallery_slideshow::events::{GalleryCommand, ViewUpdate};
use gallery_slideshow::layout::layout;
use gallery_slideshow::{render, tasks};
use tokio::io::{self, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(
    name = "gallery",
    version,
    about = "Art gallery with detail view, slideshow and hero overlay"
)]
struct Args {
    /// Path to YAML config (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Override the gallery document (path or http(s) URL)
    #[arg(long = "data", value_name = "SOURCE")]
    data: Option<String>,
    /// Override the initial viewport width in pixels
    #[arg(long = "width", value_name = "PX")]
    width: Option<u32>,
    /// Override the slideshow interval (e.g. "3s", "1500ms")
    #[arg(long = "interval", value_name = "DURATION", value_parser = humantime::parse_duration)]
    interval: Option<Duration>,
    /// Print the gallery layout for the configured width and exit
    #[arg(long = "layout-dry-run")]
    layout_dry_run: bool,
    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive(format!("gallery_slideshow={level}").parse()?)
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?);
    // Logs go to stderr so the drawn views on stdout stay readable.
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        config,
        data,
        width,
        interval,
        layout_dry_run,
        verbose,
    } = Args::parse();
    init_tracing(verbose)?;

    let mut cfg = match &config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(raw) = data {
        cfg.data_source = DataSource::parse(&raw);
    }
    if let Some(px) = width {
        cfg.viewport_width = px;
    }
    if let Some(interval) = interval {
        cfg.slideshow.interval = interval;
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    tracing::info!(
        source = %cfg.data_source,
        width = cfg.viewport_width,
        interval = %humantime::format_duration(cfg.slideshow.interval),
        "configuration ready"
    );

    let store = tasks::loader::load_store(&cfg.data_source).await;

    if layout_dry_run {
        let columns = cfg.layout.columns_for_width(cfg.viewport_width);
        print!("{}", render::gallery(&layout(store.cards(), columns)));
        return Ok(());
    }

    // Channels (small/bounded)
    let (command_tx, command_rx) = mpsc::channel::<GalleryCommand>(32); // Input -> Manager
    let (view_tx, view_rx) = mpsc::channel::<ViewUpdate>(64); // Manager -> Viewer

    let cancel = CancellationToken::new();

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!("ctrl-c handler failed: {err}");
                return;
            }
            tracing::info!("ctrl-c received; initiating shutdown");
            cancel.cancel();
        });
    }

    let mut tasks = JoinSet::new();

    // Input: EOF or `quit` hangs up the command channel; the manager and
    // viewer then drain and finish in turn.
    tasks.spawn({
        let cancel = cancel.clone();
        async move {
            let res = tasks::input::run(BufReader::new(io::stdin()), command_tx, cancel)
                .await
                .context("input task failed");
            ("input", res)
        }
    });

    // GalleryManager
    tasks.spawn({
        let cancel = cancel.clone();
        let cfg = cfg.clone();
        async move {
            let res = tasks::manager::run(store, cfg, command_rx, view_tx, cancel)
                .await
                .context("manager task failed");
            ("manager", res)
        }
    });

    // Viewer
    tasks.spawn(async move {
        let res = tasks::viewer::run(view_rx, io::stdout())
            .await
            .context("viewer task failed");
        ("viewer", res)
    });

    while let Some(res) = tasks.join_next().await {
        match res {
            Ok(("input", Ok(()))) => {
                tracing::debug!("input finished");
                continue;
            }
            Ok((name, Ok(()))) => tracing::debug!("{name} finished"),
            Ok((name, Err(e))) => tracing::error!("{name} error: {e:?}"),
            Err(e) => tracing::error!("join error: {e}"),
        }
        // A finished manager or viewer, or any failure, takes the rest down.
        cancel.cancel();
    }

    Ok(())
}
