//! Medidesk CLI - browse the portal catalogs and place orders.
//!
//! # Usage
//!
//! ```bash
//! # Search the pharmacy, antibiotics only, cheapest first
//! md-cli list medicines --search amox --filter category=Antibiotics --sort price
//!
//! # Count patients per status
//! md-cli facets patients status
//!
//! # Price and place a pharmacy order for pickup
//! md-cli checkout pharmacy --add 1 --add 1 --add 4 --pickup
//!
//! # Stock levels and expiry warnings
//! md-cli inventory --today 2024-11-01
//! ```
//!
//! # Commands
//!
//! - `list` - Filter and sort one catalog
//! - `facets` - Count records per value of a dimension
//! - `checkout` - Build a cart, show totals, submit through the configured gateway
//! - `inventory` - Stock summary and expiry report
//!
//! Logs go to stderr. Set `RUST_LOG` to change the level and
//! `MEDIDESK_LOG_JSON=1` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use medidesk_portal::CatalogKind;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::OutputFormat;
use commands::checkout::Flow;

#[derive(Parser)]
#[command(name = "md-cli")]
#[command(author, version, about = "Medidesk catalog and checkout tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the records of a catalog
    List {
        /// Catalog name (hospitals, doctors, patients, lab-orders, lab-tests,
        /// medicines, inventory, appointments, prescriptions)
        catalog: CatalogKind,

        /// Case-insensitive search text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Dimension constraint as `name=value` (repeatable)
        #[arg(short, long = "filter", value_parser = commands::parse_filter)]
        filters: Vec<(String, String)>,

        /// Sort key; prefix with `-` to reverse
        #[arg(long)]
        sort: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Count records per value of a dimension
    Facets {
        /// Catalog name
        catalog: CatalogKind,

        /// Dimension name (e.g. status, category)
        dimension: String,
    },
    /// Build a cart and place an order
    Checkout {
        /// Checkout flow
        #[arg(value_enum)]
        flow: Flow,

        /// Item id to add (repeat to increase the quantity)
        #[arg(short, long = "add", required = true)]
        add: Vec<i32>,

        /// Item id to remove one of
        #[arg(short, long = "remove")]
        remove: Vec<i32>,

        /// Collect from the pharmacy instead of home delivery
        #[arg(long)]
        pickup: bool,

        /// Show totals without submitting
        #[arg(long)]
        dry_run: bool,
    },
    /// Show stock levels and expiry warnings
    Inventory {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<chrono::NaiveDate>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file if present so RUST_LOG can live there too
    dotenvy::dotenv().ok();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "medidesk_cli=info,medidesk_portal=info".into());

    // JSON logs for log shippers, text otherwise; stdout stays for command output
    let json_logs = std::env::var("MEDIDESK_LOG_JSON").is_ok();
    let json_layer = json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::List {
            catalog,
            search,
            filters,
            sort,
            format,
        } => {
            let query = commands::list::Query {
                search,
                filters,
                sort,
            };
            commands::list::run(catalog, &query, format)?;
        }
        Commands::Facets { catalog, dimension } => {
            commands::facets::run(catalog, &dimension)?;
        }
        Commands::Checkout {
            flow,
            add,
            remove,
            pickup,
            dry_run,
        } => {
            let order = commands::checkout::Order {
                add,
                remove,
                pickup,
                dry_run,
            };
            commands::checkout::run(flow, &order).await?;
        }
        Commands::Inventory { today, format } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            commands::inventory::run(today, format)?;
        }
    }
    Ok(())
}
