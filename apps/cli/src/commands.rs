//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use scout_core::{Enricher, MemoryStore};
use scout_fetch::HttpFetcher;
use scout_shared::{AppConfig, config_file_path, init_config, load_config, load_config_from};
use tokio::net::TcpListener;
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// vc-scout: derive a structured company profile from its website.
#[derive(Parser)]
#[command(
    name = "scout",
    version,
    about = "Fetch a company website and derive summary, keywords and business signals.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.vcscout/scout.toml.
    #[arg(long, global = true, env = "SCOUT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the HTTP enrichment endpoint.
    Serve {
        /// Address to listen on (overrides `[server] bind`).
        #[arg(short, long)]
        bind: Option<String>,

        /// Allow only one in-flight fetch per URL.
        #[arg(long)]
        single_flight: bool,
    },

    /// Enrich one website and print the result as JSON.
    Enrich {
        /// Website URL; `https://` is assumed when no scheme is given.
        url: String,

        /// Print compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "scout=info",
        1 => "scout=debug",
        _ => "scout=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so `scout enrich` output stays pipeable.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Serve {
            bind,
            single_flight,
        } => cmd_serve(config_path, bind, single_flight).await,
        Command::Enrich { url, compact } => cmd_enrich(config_path, &url, compact).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path).await,
        },
    }
}

/// Config file from `--config`, else the user config, else defaults.
fn resolve_config(path: Option<PathBuf>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(&path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// Wire a fresh store and the HTTP fetcher into an enricher.
fn build_enricher(config: &AppConfig) -> Result<Enricher> {
    let fetcher = HttpFetcher::new(&config.fetch)?;
    Ok(Enricher::new(
        Arc::new(fetcher),
        Arc::new(MemoryStore::new()),
        config.enrichment.clone(),
    ))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_serve(
    config_path: Option<PathBuf>,
    bind: Option<String>,
    single_flight: bool,
) -> Result<()> {
    let mut config = resolve_config(config_path)?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if single_flight {
        config.enrichment.single_flight = true;
    }

    let enricher = build_enricher(&config)?;
    let listener = TcpListener::bind(&config.server.bind)
        .await
        .wrap_err_with(|| format!("cannot bind {}", config.server.bind))?;

    info!(
        bind = %config.server.bind,
        single_flight = config.enrichment.single_flight,
        "starting enrichment server"
    );

    scout_server::serve(listener, enricher).await?;
    Ok(())
}

async fn cmd_enrich(config_path: Option<PathBuf>, url: &str, compact: bool) -> Result<()> {
    let config = resolve_config(config_path)?;
    let enricher = build_enricher(&config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .map_err(|e| eyre!("invalid progress template: {e}"))?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message(format!("Enriching {url}"));

    let outcome = enricher.enrich(url).await;
    spinner.finish_and_clear();
    let result = outcome?;

    let json = if compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{json}");

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = config_file_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    let created = init_config()?;
    println!("Created default config at {}", created.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let rendered =
        toml::to_string_pretty(&config).map_err(|e| eyre!("failed to render config: {e}"))?;
    println!("{rendered}");
    Ok(())
}
