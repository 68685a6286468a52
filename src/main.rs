//! Portfolio server - renders the portfolio page from the data module.
//!
//! - `serve`: HTTP server with the page, a JSON API and static files
//! - `render`: write the rendered page to a file

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

use portfolio::config::Config;
use portfolio::{handlers, logging, render_page, AppState};

#[derive(Parser, Debug)]
#[command(name = "portfolio", about = "Serve or render the portfolio page")]
struct Cli {
    /// Config file (default: ./portfolio.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data module to read, overriding the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the web server (default)
    Serve {
        /// Address to bind, overriding the config
        #[arg(long)]
        bind: Option<String>,
    },
    /// Render the page once and write it to disk
    Render {
        #[arg(long, default_value = "index.html")]
        out: PathBuf,
        /// Pre-apply a project category filter
        #[arg(long)]
        filter: Option<String>,
    },
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config.data_file = data;
    }

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            serve(config).await
        }
        Command::Render { out, filter } => render(&config, &out, filter),
    }
}

async fn serve(config: Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config));

    let app = Router::new()
        .route("/", get(handlers::index))
        .route("/api/portfolio", get(handlers::portfolio_json))
        .route("/api/publications", get(handlers::publications_json))
        .nest_service("/static", ServeDir::new(&config.server.static_dir))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;

    info!("Portfolio server running at http://{}", config.server.bind);
    info!("Data file: {}", config.data_file.display());
    info!("Static files: {}", config.server.static_dir.display());

    axum::serve(listener, app).await.context("Server error")
}

fn render(config: &Config, out: &Path, filter: Option<String>) -> Result<()> {
    let state = AppState::from_config(config);
    let portfolio = state
        .load_portfolio()
        .with_context(|| format!("Failed to load {}", config.data_file.display()))?;
    let shell = state.load_shell().context("Failed to read page shell")?;

    let mut options = state.page.clone();
    options.filter = filter;
    let html = render_page(&portfolio, shell.as_deref(), &options);

    std::fs::write(out, html).with_context(|| format!("Failed to write {}", out.display()))?;
    info!("Wrote {}", out.display());
    Ok(())
}
