//! # InvenHelper Dashboard CLI
//!
//! Terminal front end over the dashboard view-model:
//!
//! - `dashboard` loads every product and prints its chart data.
//! - `products` lists the loaded products.
//! - `increase` / `decrease` adjust one product's stock.
//! - `create` / `update` register a product or change its name and description.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use invenhelper_dash::clients::InventoryApi;
use invenhelper_dash::lifecycle::{setup_tracing, DashboardSystem, InventoryConfig};
use invenhelper_dash::model::{ProductCreate, ProductUpdate, CAPACITY};
use std::path::PathBuf;
use tracing::{info, info_span, warn, Instrument};

#[derive(Parser)]
#[command(name = "invenhelper-dash")]
#[command(about = "Inventory dashboard for the InvenHelper service", long_about = None)]
struct Cli {
    /// TOML file with the backend host and endpoint paths
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every product and print its stock chart data
    Dashboard,
    /// List every product
    Products,
    /// Add stock to a product
    Increase {
        identifier: String,
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
    /// Remove stock from a product
    Decrease {
        identifier: String,
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
    /// Register a new product
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Change a product's name and/or description
    Update {
        #[arg(short, long)]
        identifier: String,
        #[arg(short, long, required_unless_present = "description")]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InventoryConfig::load(path)?,
        None => InventoryConfig::default(),
    };
    info!(host = %config.host, "Starting dashboard");

    let system = DashboardSystem::new(config)?;

    match cli.command {
        Commands::Dashboard => {
            let report = system
                .loader
                .load()
                .instrument(info_span!("load"))
                .await?;
            for failure in report.failed() {
                if let Err(e) = &failure.result {
                    warn!(identifier = %failure.identifier, error = %e, "Not shown");
                }
            }
            for stat in system.loader.stats().await? {
                let points = stat.data_points();
                println!(
                    "{:<30} {:>5} / {} (remaining {})",
                    stat.name(),
                    points.first().copied().unwrap_or(0),
                    CAPACITY,
                    points.get(1).copied().unwrap_or(0)
                );
            }
        }
        Commands::Products => {
            system
                .loader
                .load()
                .instrument(info_span!("load"))
                .await?;
            for product in system.loader.products().await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    product.identifier, product.name, product.quantity, product.description
                );
            }
        }
        Commands::Increase { identifier, amount } => {
            adjust(&system, &identifier, amount, Direction::Increase).await?;
        }
        Commands::Decrease { identifier, amount } => {
            adjust(&system, &identifier, amount, Direction::Decrease).await?;
        }
        Commands::Create { name, description } => {
            let product = system
                .inventory()
                .create_product(ProductCreate { name, description })
                .await?;
            println!("{}", product.identifier);
        }
        Commands::Update {
            identifier,
            name,
            description,
        } => {
            let product = system
                .inventory()
                .update_product(ProductUpdate {
                    identifier,
                    name,
                    description,
                })
                .await?;
            println!("{}\t{}\t{}", product.identifier, product.name, product.description);
        }
    }

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}

enum Direction {
    Increase,
    Decrease,
}

async fn adjust(
    system: &DashboardSystem,
    identifier: &str,
    amount: i32,
    direction: Direction,
) -> Result<()> {
    let product = system
        .inventory()
        .get_by_id(identifier)
        .await
        .with_context(|| format!("Failed to fetch product {}", identifier))?;

    let mut detail = system.detail(product);
    let result = match direction {
        Direction::Increase => detail.increase_quantity(amount).await,
        Direction::Decrease => detail.decrease_quantity(amount).await,
    };

    match result {
        Ok(quantity) => {
            println!("{}: {}", detail.product().name, quantity);
            Ok(())
        }
        Err(e) => {
            let alert = detail.alert();
            eprintln!("[{}] {}", alert.kind, alert.message);
            Err(e).with_context(|| format!("Stock change for {} rejected", identifier))
        }
    }
}
