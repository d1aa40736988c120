use std::path::PathBuf;

use clap::{Parser, Subcommand};
use courier_optimizer::{
    json::{schema::generate_json_schemas, types::JsonDeliveryNetwork},
    problem::{delivery_network::DeliveryNetwork, reference_network::reference_network},
};
use mimalloc::MiMalloc;
use tracing::info;

use crate::quote::QuoteArgs;

mod parsers;
mod quote;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Network document to price against, the built-in network when omitted
    #[arg(short, long, global = true, env = "COURIER_NETWORK")]
    network: Option<PathBuf>,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Computes the cheapest delivery for an order
    #[command(visible_alias = "q")]
    Quote {
        #[command(flatten)]
        args: QuoteArgs,
    },
    /// Prints the active network as JSON
    Network,
    /// Prints the JSON schemas of the order, network and quote documents
    Schema,
}

fn load_network(path: Option<&PathBuf>) -> Result<DeliveryNetwork, anyhow::Error> {
    match path {
        Some(path) => {
            info!("Loading network {:?}", path);
            JsonDeliveryNetwork::load_file(path)
        }
        None => Ok(reference_network()?),
    }
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Quote { args } => quote::run(args, load_network(cli.network.as_ref())?)?,
        Commands::Network => {
            let network = load_network(cli.network.as_ref())?;
            let json = JsonDeliveryNetwork::from(&network);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&generate_json_schemas()?)?);
        }
    }

    Ok(())
}
