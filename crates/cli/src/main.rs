//! IMEX CLI - Inquiry list management from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product to the inquiry list
//! imex cart add PX-001
//!
//! # Decrease a quantity (never below 1)
//! imex cart qty PX-001 -1
//!
//! # Show the list with totals
//! imex cart show
//!
//! # Switch language
//! imex lang set uz
//!
//! # List structural products
//! imex catalog list --filter structural
//!
//! # Submit a technical inquiry for the current list
//! imex inquiry submit --name "Aziz" --email buyer@plant.uz --message "40 m DN100"
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, adjust and show inquiry list lines
//! - `lang` - Show or switch the display language
//! - `catalog` - List catalog entries
//! - `inquiry` - Submit a technical inquiry
//!
//! State is shared with the storefront through the same store file
//! (`IMEX_STORE_PATH`, or `--store`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use imex_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "imex")]
#[command(author, version, about = "IMEX inquiry list tools")]
struct Cli {
    /// Store file to use instead of `IMEX_STORE_PATH`
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the inquiry list
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show or switch the display language
    Lang {
        #[command(subcommand)]
        action: LangAction,
    },
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Technical inquiries
    Inquiry {
        #[command(subcommand)]
        action: InquiryAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product id, e.g. PX-001
        id: String,
    },
    /// Remove a line
    Remove {
        /// Product id
        id: String,
    },
    /// Change a line's quantity by a signed delta
    Qty {
        /// Product id
        id: String,

        /// Quantity change, e.g. 2 or -1
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    /// Show lines and totals
    Show,
}

#[derive(Subcommand)]
enum LangAction {
    /// Switch language (`en`, `ru`, `uz`)
    Set {
        /// Locale tag
        tag: String,
    },
    /// Show the current language
    Show,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List catalog entries
    List {
        /// Category filter (`all`, `pipes`, `structural`, `tech`)
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
}

#[derive(Subcommand)]
enum InquiryAction {
    /// Submit an inquiry for the current list
    Submit {
        /// Contact name
        #[arg(short, long)]
        name: String,

        /// Contact email address
        #[arg(short, long)]
        email: String,

        /// Company name
        #[arg(short, long)]
        company: Option<String>,

        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Technical description
        #[arg(short, long)]
        message: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), commands::CommandError> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    let mut engine = commands::boot(&config);

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&mut engine, &id)?,
            CartAction::Remove { id } => commands::cart::remove(&mut engine, &id),
            CartAction::Qty { id, delta } => commands::cart::adjust(&mut engine, &id, delta),
            CartAction::Show => commands::cart::show(&engine)?,
        },
        Commands::Lang { action } => match action {
            LangAction::Set { tag } => commands::lang::set(&mut engine, &tag)?,
            LangAction::Show => commands::lang::show(&engine),
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List { filter } => commands::catalog::list(&engine, &filter),
        },
        Commands::Inquiry { action } => match action {
            InquiryAction::Submit {
                name,
                email,
                company,
                phone,
                message,
            } => {
                let form = imex_storefront::inquiry::InquiryForm {
                    name,
                    company,
                    email,
                    phone,
                    message,
                };
                commands::inquiry::submit(&mut engine, &config, form).await?;
            }
        },
    }
    Ok(())
}
