//! Decode command implementation.

use nktk_codec::{decode_sequence, parse_track_url, DecodedTrack};

use super::print_tracks;

/// Runs the decode command.
pub fn run(data: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tracks = decode_input(data)?;
    print_tracks(&tracks, format)
}

/// Decodes a share URL, or a bare sequence if `data` has no hash.
pub fn decode_input(data: &str) -> Result<Vec<DecodedTrack>, Box<dyn std::error::Error>> {
    let data = data.trim();
    if data.contains('#') {
        return parse_track_url(data)?.ok_or_else(|| "No track data in URL".into());
    }
    Ok(decode_sequence(data)?)
}
