//! Tile command - build a radar tile URL without touching the network.

use skytrack::radar::{resolve, RadarFrame, TileOverlayDescriptor};

use crate::error::CliError;

/// Arguments for the tile command.
pub struct TileArgs {
    pub host: String,
    pub path: String,
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

/// Run the tile command.
pub fn run(args: TileArgs) -> Result<(), CliError> {
    println!("{}", tile_url(&args)?);
    Ok(())
}

fn tile_url(args: &TileArgs) -> Result<String, CliError> {
    let frame = RadarFrame {
        capture_time: 0,
        tile_path_segment: args.path.clone(),
    };
    let descriptor = TileOverlayDescriptor::from_frame(args.host.as_str(), &frame);
    Ok(resolve(&descriptor, args.z, args.x, args.y)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(host: &str) -> TileArgs {
        TileArgs {
            host: host.to_string(),
            path: "/v2/b".to_string(),
            z: 5,
            x: 3,
            y: 2,
        }
    }

    #[test]
    fn test_tile_url() {
        assert_eq!(
            tile_url(&args("https://r.example")).unwrap(),
            "https://r.example/v2/b/256/5/3/2/3/1_0.png"
        );
    }

    #[test]
    fn test_bad_host_is_reported() {
        assert!(matches!(
            tile_url(&args("not a host")),
            Err(CliError::Feed(_))
        ));
    }
}
