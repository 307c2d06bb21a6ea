//! SkyTrack CLI - Command-line interface
//!
//! This binary provides a command-line interface to the SkyTrack library.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::{radar, tile, track};

#[derive(Parser)]
#[command(name = "skytrack")]
#[command(version, about = "Weather radar and pilot track overlays", long_about = None)]
struct Cli {
    /// Enable debug-level logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Mirror log output to stdout
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the latest radar frame and optionally print a tile URL for it
    Radar {
        /// Tile zoom level
        #[arg(long, requires_all = ["x", "y"])]
        z: Option<u8>,

        /// Tile column
        #[arg(long, requires_all = ["z", "y"])]
        x: Option<u32>,

        /// Tile row
        #[arg(long, requires_all = ["z", "x"])]
        y: Option<u32>,
    },

    /// Build a radar tile URL from a known host and frame path (no network)
    Tile {
        /// Tile server origin, e.g. https://tilecache.rainviewer.com
        #[arg(long)]
        host: String,

        /// Frame path segment, e.g. /v2/radar/1710437400
        #[arg(long)]
        path: String,

        /// Zoom level
        z: u8,

        /// Tile column
        x: u32,

        /// Tile row
        y: u32,
    },

    /// Fetch a pilot track-share feed and print its points
    Track {
        /// Feed URL (defaults to [track] feed_url in config.ini)
        url: Option<String>,

        /// Request every report from the last N hours
        #[arg(long)]
        since_hours: Option<u32>,
    },
}

fn main() {
    let cli = Cli::parse();
    let options = runner::RunOptions {
        debug: cli.debug,
        stdout_logging: cli.verbose,
    };

    let result = match cli.command {
        Commands::Radar { z, x, y } => {
            let tile = match (z, x, y) {
                (Some(z), Some(x), Some(y)) => Some((z, x, y)),
                _ => None,
            };
            radar::run(options, radar::RadarArgs { tile })
        }
        Commands::Tile { host, path, z, x, y } => tile::run(tile::TileArgs {
            host,
            path,
            z,
            x,
            y,
        }),
        Commands::Track { url, since_hours } => {
            track::run(options, track::TrackArgs { url, since_hours })
        }
    };

    if let Err(e) = result {
        e.exit();
    }
}
