mod rings;
mod sites;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ringmap_core::GeoPoint;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ringmap-cli")]
#[command(about = "Dealer coverage rings from the command line")]
struct Cli {
    /// Sites dataset to load (overrides `RINGMAP_SITES_PATH`)
    #[arg(long, global = true)]
    sites: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List sites, optionally narrowed by channel and area
    Sites {
        /// Channel/category to keep (e.g. DEALER, POS)
        #[arg(long)]
        category: Option<String>,
        /// Area to keep (e.g. "KOTA BANDUNG")
        #[arg(long)]
        area: Option<String>,
    },
    /// List areas with their site counts
    Areas,
    /// Classify sites into coverage rings around a reference site
    Rings {
        /// Reference site id
        #[arg(long)]
        site: String,
        /// Only classify candidates of this channel/category
        #[arg(long)]
        category: Option<String>,
        /// Only classify candidates in this area
        #[arg(long)]
        area: Option<String>,
        /// Keep the reference site itself in the output (distance 0)
        #[arg(long)]
        include_self: bool,
        /// Ring radii in meters, innermost first (defaults to `RINGMAP_RING_RADII_M`)
        #[arg(long)]
        radii: Option<Radii>,
        /// Print the classification as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Great-circle distance between two points
    Distance {
        /// Origin as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        from: GeoPoint,
        /// Destination as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        to: GeoPoint,
    },
}

/// Comma-separated ring radii in meters, e.g. `5000,10000,15000`.
#[derive(Debug, Clone, PartialEq)]
struct Radii(Vec<f64>);

impl std::str::FromStr for Radii {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ringmap_core::parse_radii(s).map(Radii)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ringmap_core::load_cli_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let sites_path = cli.sites.unwrap_or_else(|| config.sites_path.clone());

    match cli.command {
        Some(Commands::Sites { category, area }) => {
            let dataset = sites::load_dataset(&sites_path)?;
            let filter = ringmap_core::SiteFilter { category, area };
            sites::run_sites_list(&dataset, &filter);
        }
        Some(Commands::Areas) => {
            let dataset = sites::load_dataset(&sites_path)?;
            sites::run_areas(&dataset);
        }
        Some(Commands::Rings {
            site,
            category,
            area,
            include_self,
            radii,
            json,
        }) => {
            let dataset = sites::load_dataset(&sites_path)?;
            let radii = radii.map_or_else(|| config.ring_radii_m.clone(), |r| r.0);
            let options = rings::RingsOptions {
                filter: ringmap_core::SiteFilter { category, area },
                radii,
                exclude_self: !include_self,
                json,
            };
            rings::run_rings(&dataset, &site, &options)?;
        }
        Some(Commands::Distance { from, to }) => rings::run_distance(from, to),
        None => println!("ringmap-cli: run with --help to see available commands"),
    }

    Ok(())
}
