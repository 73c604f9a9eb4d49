//! storefront-gen - build-time data generation for a static storefront site.
//!
//! Fetches a seller's public eBay listings and generates carousel image
//! manifests, both as JSON files the site build consumes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront_gen::commands::{CarouselsCommand, ListingsCommand};
use storefront_gen::config::Config;
use storefront_gen::marketplace::Marketplace;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "storefront-gen",
    version,
    about = "Build-time data generator for a static storefront site",
    long_about = "Fetches a seller's public eBay listings and scans image folders, \
                  writing the JSON manifests the site build reads."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch seller listings and write the listings manifest
    #[command(alias = "l")]
    Listings {
        /// Seller username
        #[arg(short, long)]
        seller: Option<String>,

        /// Search query (the Browse API requires one)
        #[arg(short, long)]
        query: Option<String>,

        /// Page-size limit
        #[arg(short, long)]
        limit: Option<u32>,

        /// Marketplace to search
        #[arg(short, long)]
        marketplace: Option<Marketplace>,

        /// Output path for the listings manifest
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Scan image folders and write per-folder carousel manifests
    #[command(alias = "car")]
    Carousels {
        /// Root directory of the image folders
        #[arg(long)]
        images_root: Option<String>,

        /// Output directory for the manifests
        #[arg(long)]
        out_dir: Option<String>,
    },

    /// Run both pipelines, listings first
    All,

    /// List supported marketplaces
    Marketplaces,
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

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env()?;

    match cli.command {
        Commands::Listings { seller, query, limit, marketplace, out } => {
            // Apply CLI overrides
            if let Some(s) = seller {
                config.seller = Some(s);
            }
            if let Some(q) = query {
                config.query = q;
            }
            if let Some(l) = limit {
                config.limit = l;
            }
            if let Some(m) = marketplace {
                config.marketplace = m;
            }
            if let Some(o) = out {
                config.listings_out = o;
            }

            let cmd = ListingsCommand::new(config);
            println!("{}", cmd.execute().await?);
        }

        Commands::Carousels { images_root, out_dir } => {
            if let Some(root) = images_root {
                config.images_root = root;
            }
            if let Some(dir) = out_dir {
                config.carousels_out = dir;
            }

            let cmd = CarouselsCommand::new(config);
            println!("{}", cmd.execute()?);
        }

        Commands::All => {
            let listings = ListingsCommand::new(config.clone());
            println!("{}", listings.execute().await?);

            let carousels = CarouselsCommand::new(config);
            println!("{}", carousels.execute()?);
        }

        Commands::Marketplaces => {
            println!("Supported marketplaces:\n");
            println!("{:<6} {:<10} {:<10} {:<10}", "Code", "Header", "Global ID", "Currency");
            println!("{:-<6} {:-<10} {:-<10} {:-<10}", "", "", "", "");

            for m in Marketplace::all() {
                println!(
                    "{:<6} {:<10} {:<10} {:<10}",
                    m.to_string(),
                    m.id(),
                    m.global_id(),
                    m.currency()
                );
            }
        }
    }

    Ok(())
}
