//! Backend client CLI - query the operator search backend from a terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use backend_client::{ApiClient, ClientConfig, OperatorSearch};

/// Backend client CLI - talk to the operator search backend.
#[derive(Parser)]
#[command(name = "backend-client")]
#[command(about = "Query the operator search backend")]
#[command(version)]
pub struct Cli {
    /// Backend base address [default: http://127.0.0.1:5000]
    #[arg(long, global = true, env = "API_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search operators by legal or trade name
    Search {
        /// Text to look for
        query: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },

    /// Print the absolute URL a relative path resolves to
    Url {
        /// Request path, e.g. `/search`
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("backend_client=debug,info")
    } else {
        EnvFilter::new("backend_client=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ClientConfig::resolve(cli.base_url.as_deref());
    config
        .validate()
        .with_context(|| format!("Unusable --base-url `{}`", config.base_url()))?;
    let api = ApiClient::from_config(config);

    match cli.command {
        Commands::Search { query, json } => run_search(&api, &query, json).await,
        Commands::Url { path } => {
            println!("{}", api.url(&path)?);
            Ok(())
        }
    }
}

async fn run_search(searcher: &dyn OperatorSearch, query: &str, json: bool) -> Result<()> {
    tracing::info!(query, "Running operator search");

    let response = searcher
        .search(query)
        .await
        .with_context(|| format!("Search for `{query}` failed"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", response.render());
    }

    Ok(())
}
