//! Track command - load a pilot track feed and print it.

use chrono::{DateTime, Duration, Utc};
use skytrack::track::TrackHistory;

use crate::error::CliError;
use crate::runner::{CliRunner, RunOptions};

/// Arguments for the track command.
pub struct TrackArgs {
    pub url: Option<String>,
    pub since_hours: Option<u32>,
}

/// Run the track command.
pub fn run(options: RunOptions, args: TrackArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("track");

    // CLI takes precedence, then config
    let url = args
        .url
        .or_else(|| runner.config().track.feed_url.clone())
        .ok_or(CliError::MissingFeedUrl)?;

    let service = runner.create_service()?;
    println!("Loading track from {}", url);

    let history = match args.since_hours {
        Some(hours) => {
            let since = window_start(Utc::now(), hours)?;
            runner.block_on(service.load_track_since(&url, since))?
        }
        None => runner.block_on(service.load_track(&url))?,
    };

    println!();
    print_history(&history);
    Ok(())
}

/// Start of a reporting window `hours` long that ends at `now`.
fn window_start(now: DateTime<Utc>, hours: u32) -> Result<DateTime<Utc>, CliError> {
    Duration::try_hours(i64::from(hours))
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or(CliError::SinceOutOfRange(hours))
}

fn print_history(history: &TrackHistory) {
    let Some(summary) = history.summary() else {
        println!("Feed returned no usable track points.");
        return;
    };

    println!(
        "{:<20} {:>10} {:>11} {:>9} {:>9}  {}",
        "Time (UTC)", "Latitude", "Longitude", "Alt (m)", "Speed", "Pilot"
    );
    for point in history.iter() {
        println!(
            "{:<20} {:>10.5} {:>11.5} {:>9.0} {:>9.1}  {}{}",
            point.timestamp.format("%Y-%m-%d %H:%M:%S"),
            point.coordinates.latitude,
            point.coordinates.longitude,
            point.altitude,
            point.speed,
            point.pilot_name,
            if point.in_emergency { "  [EMERGENCY]" } else { "" }
        );
    }

    println!();
    println!("Points:       {}", summary.point_count);
    println!(
        "Duration:     {} min",
        summary.duration.as_secs() / 60
    );
    println!("Distance:     {:.1} km", summary.distance_km);
    println!("Max altitude: {:.0} m", summary.max_altitude);
    println!("Max speed:    {:.1}", summary.max_speed);
    if let Some(bearing) = summary.overall_bearing {
        println!("Heading:      {:.0}°", bearing);
    }
    if summary.any_emergency {
        println!();
        println!("WARNING: {} point(s) reported in emergency mode", history.emergencies().len());
    }
}
