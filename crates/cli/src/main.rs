//! Shopdesk CLI - Shipping method management and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # List shipping methods
//! sd-cli shipping list
//!
//! # Create a shipping method
//! sd-cli shipping add -n "Standard" --price 5.99
//!
//! # Seed shipping methods from a YAML file
//! sd-cli seed shipping seeds/shipping_methods.yaml
//!
//! # Validate and normalize a seed file without a database
//! sd-cli seed shipping seeds/shipping_methods.yaml --dry-run
//! ```
//!
//! # Commands
//!
//! - `shipping` - List, add, update and delete shipping methods
//! - `seed` - Seed the database from YAML files

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use shopdesk_admin::config::AdminConfig;
use shopdesk_admin::db::{self, MemoryShippingMethodStore, MongoShippingMethodStore};
use shopdesk_admin::services::ShippingMethodsService;

use commands::CommandError;
use commands::shipping::MethodFields;

mod commands;

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(author, version, about = "Shopdesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage shipping methods
    Shipping {
        #[command(subcommand)]
        action: ShippingAction,
    },
    /// Seed the database from YAML files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum ShippingAction {
    /// List shipping methods
    List {
        /// Only show the method with this id
        #[arg(long)]
        id: Option<String>,
    },
    /// Create a shipping method
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update fields of a shipping method
    Update {
        /// Shipping method id (24 hex characters)
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a shipping method
    Delete {
        /// Shipping method id (24 hex characters)
        id: String,
    },
}

#[derive(clap::Args)]
struct FieldArgs {
    /// Display name
    #[arg(short, long)]
    name: Option<String>,

    /// Description shown at checkout
    #[arg(short, long)]
    description: Option<String>,

    /// Sort position
    #[arg(long)]
    position: Option<f64>,

    /// Whether the method is offered (`true` or `false`)
    #[arg(long)]
    enabled: Option<bool>,

    /// Flat price
    #[arg(long)]
    price: Option<f64>,
}

impl From<FieldArgs> for MethodFields {
    fn from(args: FieldArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            position: args.position,
            enabled: args.enabled,
            price: args.price,
        }
    }
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Seed shipping methods
    Shipping {
        /// Path to the YAML seed file
        file: PathBuf,

        /// Normalize entries against an in-memory store instead of the database
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Shipping { action } => {
            let service = connect().await?;
            match action {
                ShippingAction::List { id } => {
                    print_json(&commands::shipping::list(&service, id).await?)?;
                }
                ShippingAction::Add { fields } => {
                    print_json(&commands::shipping::add(&service, fields.into()).await?)?;
                }
                ShippingAction::Update { id, fields } => {
                    print_json(&commands::shipping::update(&service, &id, fields.into()).await?)?;
                }
                ShippingAction::Delete { id } => {
                    print_json(&commands::shipping::delete(&service, &id).await?)?;
                }
            }
        }
        Commands::Seed { target } => match target {
            SeedTarget::Shipping { file, dry_run } => {
                let entries = commands::seed::load_file(&file).await?;
                let created = if dry_run {
                    let service = ShippingMethodsService::new(MemoryShippingMethodStore::new());
                    commands::seed::shipping_methods(&service, &entries).await?
                } else {
                    let service = connect().await?;
                    commands::seed::shipping_methods(&service, &entries).await?
                };
                print_json(&created)?;
            }
        },
    }
    Ok(())
}

/// Build a service backed by the configured `MongoDB` database.
async fn connect() -> Result<ShippingMethodsService<MongoShippingMethodStore>, CommandError> {
    let config = AdminConfig::from_env()?;
    let database = db::connect(&config).await?;
    tracing::info!(database = %config.database_name, "Connected to MongoDB");
    Ok(ShippingMethodsService::new(MongoShippingMethodStore::new(
        &database,
    )))
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
