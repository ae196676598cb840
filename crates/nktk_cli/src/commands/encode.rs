//! Encode command implementation.

use nktk_codec::{encode_sequence, share_parameter, TrackRecord};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// One track record or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TrackInput {
    /// Several records, encoded in order.
    Many(Vec<TrackRecord>),
    /// A single record.
    One(TrackRecord),
}

impl TrackInput {
    /// The records, in order.
    pub fn into_tracks(self) -> Vec<TrackRecord> {
        match self {
            TrackInput::Many(tracks) => tracks,
            TrackInput::One(track) => vec![track],
        }
    }
}

/// Runs the encode command.
pub fn run(input: Option<&Path>, page_url: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let json = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    println!("{}", encode_json(&json, page_url)?);
    Ok(())
}

/// Encodes JSON track records, optionally as a share URL on `page_url`.
pub fn encode_json(json: &str, page_url: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let tracks = serde_json::from_str::<TrackInput>(json)?.into_tracks();
    if tracks.is_empty() {
        return Err("No tracks to encode".into());
    }
    info!(count = tracks.len(), "encoding tracks");

    let encoded = match page_url {
        Some(page) => {
            let page = page.split('#').next().unwrap_or(page);
            format!("{}#{}", page, share_parameter(&tracks)?)
        }
        None => encode_sequence(&tracks)?,
    };
    Ok(encoded)
}
