// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use ofac_addresses::release::{self, BumpType, ReleasePipeline, Version};
use ofac_addresses::utils::logging::{format_error, format_info, format_success, init_logger};
use ofac_addresses::{Config, SdnFetcher, snapshot};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "ofac_addresses")]
#[command(author = "cipher")]
#[command(version)]
#[command(about = "OFAC SDN sanctioned Bitcoin address extraction", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the live SDN export and print the extracted addresses
    Fetch {
        #[arg(long)]
        json: bool,
    },

    /// Print the bundled snapshot addresses
    Snapshot {
        #[arg(long)]
        json: bool,

        #[arg(long)]
        count: bool,
    },

    /// Bump the version and publish a new snapshot release
    Release {
        #[arg(long, value_enum, default_value = "patch", env = release::BUMP_ENV)]
        bump: BumpType,

        #[arg(long, value_name = "VERSION", env = release::VERSION_ENV)]
        set_version: Option<String>,

        #[arg(long, default_value = "Cargo.toml")]
        manifest: PathBuf,

        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.color, cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{}", format_error(&format!("{err:#}")));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Fetch { json } => {
            let fetcher = SdnFetcher::with_url(&config.source.url);
            let addresses = fetcher
                .fetch_bitcoin_addresses()
                .await
                .context("failed to fetch SDN export")?;
            print_addresses(&addresses, json)?;
            eprintln!(
                "{}",
                format_success(&format!("{} addresses extracted", addresses.len()))
            );
        }

        Commands::Snapshot { json, count } => {
            let addresses = snapshot::bitcoin_addresses();
            if count {
                println!("{}", addresses.len());
            } else {
                print_addresses(addresses, json)?;
                eprintln!(
                    "{}",
                    format_info(&format!("snapshot holds {} addresses", addresses.len()))
                );
            }
        }

        Commands::Release { bump, set_version, manifest, dry_run } => {
            let explicit = set_version
                .as_deref()
                .map(str::parse::<Version>)
                .transpose()?;
            let version = release::resolve_version(
                explicit,
                &config.release.registry_url,
                env!("CARGO_PKG_NAME"),
                bump,
            )
            .await
            .context("failed to resolve release version")?;

            let address_count = snapshot::address_count();
            info!("publishing v{} with {} addresses", version, address_count);

            let pipeline = ReleasePipeline::new(&config.release.remote, dry_run);
            pipeline
                .run_all(&manifest, version, address_count)
                .context("release pipeline failed")?;
            eprintln!("{}", format_success(&format!("released {}", version.tag_name())));
        }
    }

    Ok(())
}

fn print_addresses(addresses: &[String], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(addresses)?);
    } else {
        for address in addresses {
            println!("{address}");
        }
    }
    Ok(())
}
