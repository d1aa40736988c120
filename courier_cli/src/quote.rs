use std::{fs::File, io::BufReader, path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use courier_optimizer::{
    json::types::{FromNetwork, JsonQuote},
    problem::{delivery_network::DeliveryNetwork, order::Order},
    solver::optimizer::{DEFAULT_MAX_CENTERS, Optimizer, OptimizerParams, Threads},
};
use tracing::info;

use crate::parsers;

#[derive(Args)]
pub struct QuoteArgs {
    /// Order document, `{"PRODUCT": QUANTITY, ...}`
    #[arg(short, long)]
    order: Option<PathBuf>,

    /// Order line, can be repeated and is added on top of `--order`
    #[arg(short, long = "item", value_name = "PRODUCT=QTY", value_parser = parsers::parse_item)]
    items: Vec<(String, u32)>,

    #[arg(long, env = "COURIER_MAX_CENTERS", default_value_t = DEFAULT_MAX_CENTERS)]
    max_centers: usize,

    /// "single", "auto" or a number of threads
    #[arg(short, long, env = "COURIER_THREADS", default_value = "single")]
    threads: Threads,

    /// Print the leg breakdown as a table instead of JSON
    #[arg(long)]
    table: bool,
}

fn read_order(args: &QuoteArgs) -> Result<Order, anyhow::Error> {
    let mut order = match &args.order {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open order file {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("failed to parse order file {}", path.display()))?
        }
        None => Order::new(),
    };

    for (product, quantity) in &args.items {
        order.insert(product.as_str(), *quantity);
    }

    Ok(order)
}

fn legs_table(quote: &JsonQuote) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["From", "To", "Distance", "Weight", "Rate", "Cost"]);

    for leg in &quote.legs {
        table.add_row(vec![
            leg.from.clone(),
            leg.to.clone(),
            leg.distance.to_string(),
            leg.carried_weight.to_string(),
            leg.rate.to_string(),
            leg.cost.to_string(),
        ]);
    }

    table
}

pub fn run(args: QuoteArgs, network: DeliveryNetwork) -> Result<(), anyhow::Error> {
    let order = read_order(&args)?;
    info!(items = order.len(), "Computing quote");

    let optimizer = Optimizer::new(
        Arc::new(network),
        OptimizerParams {
            max_centers: args.max_centers,
            threads: args.threads,
        },
    )?;

    let quote = optimizer.optimize(&order)?;
    let json = JsonQuote::from_network(&quote, optimizer.network());

    if args.table {
        println!("{}", legs_table(&json));
        println!("Minimum cost: {}", json.minimum_cost);
    } else {
        println!("{}", serde_json::to_string_pretty(&json)?);
    }

    Ok(())
}
