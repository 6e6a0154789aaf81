use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod store;
mod utils;

use crate::commands::lookup::LookupArgs;
use crate::commands::AppContext;
use crate::config::AppConfig;
use crate::utils::errors::AppError;

#[derive(Parser)]
#[command(name = "invoice-lookup", version, about = "Look up InvoiceCloud invoice balances")]
struct Cli {
    /// Directory for exported results and templates (overrides INVOICE_OUTPUT_DIR)
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single invoice
    Lookup {
        /// Biller GUID (defaults to the saved one)
        #[arg(long)]
        biller_guid: Option<String>,
        /// Web service key (defaults to the saved one)
        #[arg(long)]
        web_service_key: Option<String>,
        /// Invoice number
        #[arg(long)]
        invoice: String,
        /// Remember the biller GUID and web service key
        #[arg(long)]
        save_credentials: bool,
    },
    /// Look up every row of a CSV file (BillerGUID,WebServiceKey,InvoiceNumber; no header)
    Batch {
        file: PathBuf,
    },
    /// Show past lookups, most recent first
    History,
    /// Write a CSV upload template
    Template,
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    debug!("Configuration: {:?}", config);
    let ctx = AppContext::new(config, cli.output_dir)?;

    match cli.command {
        Commands::Lookup {
            biller_guid,
            web_service_key,
            invoice,
            save_credentials,
        } => {
            let args = LookupArgs {
                biller_guid,
                web_service_key,
                invoice_number: invoice,
                save_credentials,
            };
            commands::lookup::execute(&ctx, args).await
        }
        Commands::Batch { file } => commands::batch::execute(&ctx, &file).await,
        Commands::History => commands::history::execute(&ctx),
        Commands::Template => commands::template::execute(&ctx),
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("invoice_lookup=info,reqwest=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}
