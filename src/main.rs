//! popmart-deeplink - Turn a product catalog into buy-now order confirmation links

use anyhow::Result;
use clap::{Parser, Subcommand};
use popmart_deeplink::catalog::Variant;
use popmart_deeplink::commands::{BatchCommand, LinkCommand, LinkRequest, ListCommand};
use popmart_deeplink::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "popmart-deeplink",
    version,
    about = "Turn a product catalog into POP MART buy-now links",
    long_about = "Reads a Name,URL,skuid_single,skuid_set catalog and builds order confirmation deep links for a chosen product, variant, and quantity."
)]
struct Cli {
    /// Catalog file ('-' reads stdin; the bundled catalog is used when omitted)
    #[arg(long, global = true, env = "POPLINK_CATALOG")]
    catalog: Option<PathBuf>,

    /// Checkout page the links point at
    #[arg(long, global = true, env = "POPLINK_CHECKOUT_URL")]
    checkout_url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog entries
    #[command(alias = "l")]
    List,

    /// Generate a link for one catalog entry
    #[command(alias = "g")]
    Link {
        /// Entry index as shown by `list`
        #[arg(short, long)]
        entry: Option<usize>,

        /// Variant (single or set); defaults to the entry's first available
        #[arg(short = 't', long)]
        variant: Option<Variant>,

        /// Quantity, clamped to the variant's limit
        #[arg(short, long, allow_hyphen_values = true)]
        quantity: Option<String>,
    },

    /// Build a link directly from a product URL and SKU
    #[command(alias = "b")]
    Build {
        /// Product page URL containing /products/{id}/
        url: String,

        /// SKU identifier
        sku: String,

        /// Quantity
        #[arg(default_value = "1")]
        count: u32,
    },

    /// Generate links for every entry and variant
    #[command(alias = "a")]
    All {
        /// Quantity, clamped per variant
        #[arg(short, long, allow_hyphen_values = true)]
        quantity: Option<String>,
    },

    /// List purchase variants and their quantity limits
    Variants,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(catalog) = cli.catalog {
        config.catalog = Some(catalog);
    }
    if let Some(checkout_url) = cli.checkout_url {
        config.checkout_url = checkout_url;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    config.validate()?;

    match cli.command {
        Commands::List => {
            let output = ListCommand::new(config).execute().await?;
            println!("{}", output);
        }

        Commands::Link { entry, variant, quantity } => {
            let request = LinkRequest { entry, variant, quantity };
            let output = LinkCommand::new(config).execute(&request).await?;
            println!("{}", output);
        }

        Commands::Build { url, sku, count } => {
            let output = LinkCommand::new(config).execute_direct(&url, &sku, count);
            println!("{}", output);
        }

        Commands::All { quantity } => {
            let output = BatchCommand::new(config).execute(quantity.as_deref()).await?;
            println!("{}", output);
        }

        Commands::Variants => {
            println!("Purchase variants:\n");
            println!("{:<8} {:<12} {:<8}", "Code", "Label", "Max qty");
            println!("{:-<8} {:-<12} {:-<8}", "", "", "");

            for variant in Variant::all() {
                println!(
                    "{:<8} {:<12} {:<8}",
                    variant.to_string(),
                    variant.label(),
                    variant.max_quantity()
                );
            }
        }
    }

    Ok(())
}
