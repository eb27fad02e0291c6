/// Aria - terminal music player
use aria_catalog::CatalogClient;
use aria_cli::{
    commands::{play, queue, search, QueueAction, RepeatArg, SearchKind},
    session::{open_store, Session},
    AriaSettings,
};
use aria_transport::SilentBackend;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aria")]
#[command(about = "Search the catalog and play from a persistent queue", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./aria.toml when present)
    #[arg(short, long, global = true, env = "ARIA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search songs, artists or albums
    Search {
        kind: SearchKind,
        query: String,
        /// 1-based result page
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Inspect or edit the saved queue
    #[command(subcommand)]
    Queue(QueueAction),
    /// Play a song (or the saved queue) until the queue ends or Ctrl-C
    Play {
        /// Catalog id; resumes the current queue entry when omitted
        id: Option<String>,
        #[arg(long)]
        shuffle: bool,
        #[arg(long, value_enum)]
        repeat: Option<RepeatArg>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aria=info,aria_playback=info,aria_transport=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut settings = AriaSettings::load(cli.config.as_deref())?;
    settings.validate()?;

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Search { kind, query, page } => {
            let catalog = CatalogClient::new(settings.catalog.clone())?;
            search::run(&catalog, kind, &query, page, &mut stdout).await?;
        }
        Commands::Queue(action) => {
            let store = open_store(&settings).await?;
            let catalog = CatalogClient::new(settings.catalog.clone())?;
            let session = Session::start(&settings, store, catalog, SilentBackend::default()).await;

            let result = queue::run(&session, action, &mut stdout).await;
            session.shutdown().await?;
            result?;
        }
        Commands::Play {
            id,
            shuffle,
            repeat,
        } => {
            settings.playback.shuffle |= shuffle;
            if let Some(repeat) = repeat {
                settings.playback.repeat = repeat.into();
            }

            let store = open_store(&settings).await?;
            let catalog = CatalogClient::new(settings.catalog.clone())?;
            let (session, requested) = play::prepare(&settings, store, catalog, id.as_deref()).await?;

            let ctrl_c = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            };

            let result = play::run(&session, requested, &mut stdout, ctrl_c).await;
            session.shutdown().await?;
            let summary = result?;
            tracing::info!(
                finished = summary.finished.len(),
                interrupted = summary.interrupted,
                "Playback ended"
            );
        }
    }

    stdout.flush()?;
    Ok(())
}
