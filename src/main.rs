use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use splinkcli::{cli, config, scanner::Service, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Add the tracks of a chat export that are missing from a playlist
    Sync(SyncOptions),

    /// List the links found in a chat export
    Scan(ScanOptions),

    /// Open anonymous YouTube playlists for the videos of a chat export
    Youtube(YoutubeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SyncOptions {
    /// Path of the exported chat (.txt); asked for when missing or invalid
    #[clap(long)]
    pub transcript: Option<PathBuf>,

    /// Spotify playlist ID to add to (overrides SPLINK_PLAYLIST_ID)
    #[clap(long)]
    pub playlist: Option<String>,

    /// Only collect links starting with this prefix
    #[clap(long)]
    pub prefix: Option<String>,

    /// Show what would be added without changing the playlist
    #[clap(long)]
    pub dry_run: bool,

    /// Add each new track once even if it was shared several times
    #[clap(long)]
    pub dedupe: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ScanOptions {
    #[clap(long)]
    pub transcript: Option<PathBuf>,

    /// Service whose links are collected
    #[clap(long, value_enum, default_value = "spotify")]
    pub service: Service,

    /// Only collect Spotify links starting with this prefix
    #[clap(long)]
    pub prefix: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct YoutubeOptions {
    #[clap(long)]
    pub transcript: Option<PathBuf>,

    /// Print the playlist URLs instead of opening them
    #[clap(long)]
    pub no_browser: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    config::load_env().await;

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Sync(opt) => {
            cli::sync(
                opt.transcript,
                opt.playlist,
                opt.prefix,
                opt.dry_run,
                opt.dedupe,
            )
            .await
        }
        Command::Scan(opt) => cli::scan(opt.transcript, opt.service, opt.prefix).await,
        Command::Youtube(opt) => cli::youtube(opt.transcript, opt.no_browser).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
