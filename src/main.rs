//! Wallhaven client entry point
//!
//! Command-line front end over the library: search, inspect, download and
//! edit wallpapers with an optional signed-in session.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wallhaven_client::client::DEFAULT_CHUNK_SIZE;
use wallhaven_client::config::{load_config, ClientConfig};
use wallhaven_client::{FieldSelection, SearchFilters, WallhavenClient};

/// Wallhaven client: search, inspect and download wallpapers
#[derive(Parser, Debug)]
#[command(name = "wallhaven-client")]
#[command(version)]
#[command(about = "Scraping client for the Wallhaven gallery", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Account name, overrides the configuration file
    #[arg(short, long, requires = "password")]
    username: Option<String>,

    /// Account password, overrides the configuration file
    #[arg(short, long, requires = "username")]
    password: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the number of result pages
    Pages(SearchArgs),

    /// Print the wallpaper ids of one result page
    Search {
        #[command(flatten)]
        filters: SearchArgs,

        /// 1-based result page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Check whether a wallpaper exists
    Exists { id: String },

    /// Print every field of a wallpaper as JSON
    Info { id: String },

    /// Download a wallpaper
    Download {
        id: String,
        path: PathBuf,

        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },

    /// Add a tag to a wallpaper (requires login)
    TagAdd { id: String, name: String },

    /// Remove a tag from a wallpaper (requires login)
    TagRemove { id: String, tag_id: String },

    /// Change the purity of a wallpaper: sfw, sketchy or nsfw (requires login)
    Purity { id: String, purity: String },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Free-text query
    #[arg(long)]
    query: Option<String>,

    #[arg(long)]
    no_general: bool,

    #[arg(long)]
    no_anime: bool,

    #[arg(long)]
    no_people: bool,

    #[arg(long)]
    no_sfw: bool,

    #[arg(long)]
    no_sketchy: bool,

    /// Include NSFW results (needs a session that may see them)
    #[arg(long)]
    nsfw: bool,

    /// Comma-separated resolutions, e.g. 1920x1080
    #[arg(long, default_value = "")]
    resolutions: String,

    /// Comma-separated aspect ratios, e.g. 16x9
    #[arg(long, default_value = "")]
    ratios: String,

    /// Sort key, e.g. date_added, views, favorites
    #[arg(long, default_value = "")]
    sorting: String,

    #[arg(long, default_value = "desc")]
    order: String,
}

impl SearchArgs {
    fn to_filters(&self) -> SearchFilters {
        let mut filters = SearchFilters {
            resolutions: self.resolutions.clone(),
            ratios: self.ratios.clone(),
            sorting: self.sorting.clone(),
            order: self.order.clone(),
            query: self.query.clone(),
            ..SearchFilters::default()
        };

        filters.categories.general = !self.no_general;
        filters.categories.anime = !self.no_anime;
        filters.categories.people = !self.no_people;
        filters.purity.sfw = !self.no_sfw;
        filters.purity.sketchy = !self.no_sketchy;
        filters.purity.nsfw = self.nsfw;

        filters
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => ClientConfig::default(),
    };

    if let (Some(username), Some(password)) = (cli.username, cli.password) {
        config.auth.username = Some(username);
        config.auth.password = Some(password);
    }

    let client = WallhavenClient::new(config).await?;

    let succeeded = run_command(&client, cli.command).await?;

    if client.is_authenticated().await && !client.logout().await? {
        tracing::warn!("Logout failed");
    }

    if !succeeded {
        bail!("Operation failed");
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wallhaven_client=info,warn"),
            1 => EnvFilter::new("wallhaven_client=debug,info"),
            2 => EnvFilter::new("wallhaven_client=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one subcommand, returning whether it succeeded
async fn run_command(client: &WallhavenClient, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Pages(args) => match client.get_pages_count(&args.to_filters(), 1).await? {
            Some(count) => {
                println!("{}", count);
                Ok(true)
            }
            None => {
                tracing::error!("No results heading found");
                Ok(false)
            }
        },
        Command::Search { filters, page } => {
            match client.get_images_numbers(&filters.to_filters(), page).await? {
                Some(ids) => {
                    for id in ids {
                        println!("{}", id);
                    }
                    Ok(true)
                }
                None => {
                    tracing::error!("No results section found on page {}", page);
                    Ok(false)
                }
            }
        }
        Command::Exists { id } => {
            let exists = client.exists(&id).await?;
            println!("{}", exists);
            Ok(exists)
        }
        Command::Info { id } => {
            let record = client.get_record(&id, &FieldSelection::all()).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(!record.is_empty())
        }
        Command::Download {
            id,
            path,
            chunk_size,
        } => Ok(client.download(&id, &path, chunk_size).await?),
        Command::TagAdd { id, name } => Ok(client.add_tag(&id, &name).await?),
        Command::TagRemove { id, tag_id } => Ok(client.delete_tag(&id, &tag_id).await?),
        Command::Purity { id, purity } => Ok(client.change_purity(&id, &purity).await?),
    }
}
