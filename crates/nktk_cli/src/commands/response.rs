//! Response command implementation.

use nktk_codec::{DecodedTrack, LinkConfig, LinkResolver};
use std::path::Path;

use super::print_tracks;

/// Runs the response command.
pub fn run(config: LinkConfig, file: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tracks = decode_file(config, file)?;
    print_tracks(&tracks, format)
}

/// Decodes a fetched body saved at `file`.
pub fn decode_file(
    config: LinkConfig,
    file: &Path,
) -> Result<Vec<DecodedTrack>, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("Response file not found: {:?}", file).into());
    }
    let body = std::fs::read(file)?;
    Ok(LinkResolver::new(config).parse_responses(&[body])?)
}
