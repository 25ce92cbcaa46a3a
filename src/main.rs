use anyhow::{Context, Result};
use clap::Parser;
use torbox::constants::ControlOperation;
use torbox::{Logger, TorboxClient, commands};
use tracing_subscriber::EnvFilter;

/// torbox - TorBox command line client
///
/// Lists and manages downloads on a TorBox account.
///
/// The API key is read from --api-key or the TORBOX_API_KEY environment variable.
/// Log verbosity follows RUST_LOG (or LOG_LEVEL), defaulting to warnings only.
///
/// Examples:
///   torbox active                          # Show active torrents
///   torbox add "magnet:?xt=urn:btih:HASH"  # Add a torrent from a magnet link
///   torbox control 42 pause                # Pause torrent 42
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TorBox API key
    #[arg(
        long = "api-key",
        env = "TORBOX_API_KEY",
        value_name = "KEY",
        global = true,
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// General API URL (defaults to https://api.torbox.app/v1)
    #[arg(long = "api-url", env = "TORBOX_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Search API URL (defaults to https://search-api.torbox.app)
    #[arg(
        long = "search-url",
        env = "TORBOX_SEARCH_URL",
        value_name = "URL",
        global = true
    )]
    pub search_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show active torrents
    Active,

    /// Show queued torrents
    Queued,

    /// Add a torrent from a magnet link or a .torrent file
    Add(AddArgs),

    /// Control an active or queued torrent
    Control(ControlArgs),

    /// Parse a magnet link without contacting TorBox
    Magnet(MagnetArgs),

    /// Walk through the main endpoints of the account
    Demo,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Magnet URI or path to a .torrent file
    #[arg(value_name = "MAGNET|FILE")]
    pub source: String,

    /// Name to give the torrent
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ControlArgs {
    /// Torrent ID
    #[arg(value_name = "ID")]
    pub id: i64,

    /// One of reannounce, delete, resume, pause, start
    #[arg(value_name = "OP")]
    pub operation: ControlOperation,
}

#[derive(clap::Args, Debug)]
pub struct MagnetArgs {
    #[arg(value_name = "URI")]
    pub uri: String,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(cli: &Cli) -> Result<TorboxClient> {
    let api_key = cli
        .api_key
        .clone()
        .context("TORBOX_API_KEY environment variable is not set")?;

    let mut builder = TorboxClient::builder()
        .api_key(api_key)
        .logger(Logger::current());
    if let Some(url) = &cli.api_url {
        builder = builder.general_base_url(url);
    }
    if let Some(url) = &cli.search_url {
        builder = builder.search_base_url(url);
    }
    Ok(builder.build()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    if let Commands::Magnet(args) = &cli.command {
        return commands::magnet(&args.uri);
    }

    let client = build_client(&cli)?;
    match cli.command {
        Commands::Active => commands::active(&client).await?,
        Commands::Queued => commands::queued(&client).await?,
        Commands::Add(args) => commands::add(&client, &args.source, args.name).await?,
        Commands::Control(args) => commands::control(&client, args.id, args.operation).await?,
        Commands::Demo => commands::demo(&client).await?,
        Commands::Magnet(_) => {}
    }
    Ok(())
}
