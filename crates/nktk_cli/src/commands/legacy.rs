//! Legacy parameter command implementation.

use nktk_codec::decode_track_url_data;

use super::print_tracks;

/// Runs the legacy command.
pub fn run(data: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let track = decode_track_url_data(data.trim())?;
    print_tracks(&[track], format)
}
