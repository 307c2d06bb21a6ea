//! Radar command - show the latest radar frame.

use skytrack::radar::TileUrlSource;

use super::format_unix_time;
use crate::error::CliError;
use crate::runner::{CliRunner, RunOptions};

/// Arguments for the radar command.
pub struct RadarArgs {
    /// Tile to print a URL for, as (z, x, y).
    pub tile: Option<(u8, u32, u32)>,
}

/// Run the radar command.
pub fn run(options: RunOptions, args: RadarArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("radar");

    let service = runner.create_service()?;
    println!("Fetching radar metadata from {}", runner.config().radar.metadata_url);

    let descriptor = runner.block_on(service.refresh_radar())?;

    println!();
    println!("Latest radar frame:");
    println!("  Host:     {}", descriptor.origin_host);
    println!("  Path:     {}", descriptor.tile_path_segment);
    println!("  Captured: {}", format_unix_time(descriptor.capture_time));

    if let Some((z, x, y)) = args.tile {
        let url = descriptor.tile_url(z, x, y)?;
        println!();
        println!("Tile {}/{}/{}:", z, x, y);
        println!("  {}", url);
    }

    Ok(())
}
