//! storecart CLI - Browse the catalog snapshot and manage the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! storecart catalog categories
//! storecart catalog search "backpack"
//! storecart catalog related 1
//!
//! # Manage the cart
//! storecart cart add 1
//! storecart cart show
//! storecart cart total --select 1 --quantity 1=2
//! storecart cart remove 1 --yes
//! storecart cart reset
//! ```
//!
//! # Commands
//!
//! - `catalog` - Read-only views over the catalog snapshot
//! - `cart` - Cart mutations, written through to the data directory
//!
//! Configuration comes from `STORECART_*` environment variables (see
//! [`storecart::CartConfig`]) and log filtering from `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use storecart::{CartConfig, LogFormat};
use storecart_core::ProductId;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "storecart")]
#[command(author, version, about = "Shopping cart with local persistence")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List products in the cart
    Show,
    /// Add a catalog product to the cart
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,

        /// Confirm the removal
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the checkout total for selected products
    Total {
        /// Product ids to include, comma separated
        #[arg(short, long, value_delimiter = ',')]
        select: Vec<ProductId>,

        /// Quantity for a product, as `ID=N`
        #[arg(short, long = "quantity", value_parser = parse_quantity)]
        quantities: Vec<(ProductId, u32)>,
    },
    /// Empty the cart and delete the stored copy
    Reset,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List categories
    Categories,
    /// Search product titles
    Search {
        /// Case-insensitive text to look for
        query: String,
    },
    /// List products in a category
    Category {
        /// Category name
        name: String,
    },
    /// Show a product and related products
    Related {
        /// Product id
        id: ProductId,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = CartConfig::from_env();
    init_tracing(config.as_ref().map_or(LogFormat::default(), |c| c.log_format));
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli, config: &CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(config).await?,
            CartAction::Add { id } => commands::cart::add(config, id).await?,
            CartAction::Remove { id, yes } => commands::cart::remove(config, id, yes).await?,
            CartAction::Total { select, quantities } => {
                commands::cart::total(config, &select, &quantities).await?;
            }
            CartAction::Reset => commands::cart::reset(config).await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Categories => commands::catalog::categories(config).await,
            CatalogAction::Search { query } => commands::catalog::search(config, &query).await,
            CatalogAction::Category { name } => commands::catalog::category(config, &name).await,
            CatalogAction::Related { id } => commands::catalog::related(config, id).await?,
        },
    }
    Ok(())
}

/// Parse a `ID=N` quantity argument.
fn parse_quantity(raw: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=N, got {raw:?}"))?;
    let id = id
        .parse::<ProductId>()
        .map_err(|e| format!("invalid product id {id:?}: {e}"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity {quantity:?}: {e}"))?;
    if quantity == 0 {
        return Err("quantity must be at least 1".to_string());
    }
    Ok((id, quantity))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3=2").unwrap(), (ProductId::new(3), 2));
        assert_eq!(parse_quantity(" 7 = 10").unwrap(), (ProductId::new(7), 10));
    }

    #[test]
    fn test_parse_quantity_rejects_bad_input() {
        assert!(parse_quantity("3").is_err());
        assert!(parse_quantity("x=2").is_err());
        assert!(parse_quantity("3=0").is_err());
        assert!(parse_quantity("3=-1").is_err());
    }

    #[test]
    fn test_cli_parses_total() {
        let cli = Cli::try_parse_from([
            "storecart", "cart", "total", "--select", "1,2", "--quantity", "1=3",
        ])
        .unwrap();
        let Commands::Cart {
            action: CartAction::Total { select, quantities },
        } = cli.command
        else {
            panic!("expected cart total");
        };
        assert_eq!(select, vec![ProductId::new(1), ProductId::new(2)]);
        assert_eq!(quantities, vec![(ProductId::new(1), 3)]);
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
