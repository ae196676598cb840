//! CLI command implementations.

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod legacy;
pub mod link;
pub mod response;

use nktk_codec::DecodedTrack;

/// Prints decode results as text or JSON.
pub fn print_tracks(
    tracks: &[DecodedTrack],
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(tracks)?);
        }
        _ => {
            for (index, result) in tracks.iter().enumerate() {
                print!("{}", summarize(index, result));
            }
        }
    }
    Ok(())
}

fn summarize(index: usize, result: &DecodedTrack) -> String {
    let track = &result.track;
    let status = if result.is_corrupt() { "CORRUPT" } else { "ok" };
    let mut out = format!("[{}] {} ({})\n", index, track.name, status);
    out.push_str(&format!(
        "  segments:  {} ({} points)\n",
        track.segments.len(),
        track.point_count()
    ));
    out.push_str(&format!("  waypoints: {}\n", track.waypoints.len()));
    for waypoint in &track.waypoints {
        out.push_str(&format!(
            "    {:.6},{:.6} {}\n",
            waypoint.lat, waypoint.lng, waypoint.label
        ));
    }
    out.push_str(&format!(
        "  color={} ticks={} hidden={}\n",
        track.color, track.measure_ticks_shown, track.track_hidden
    ));
    out
}
