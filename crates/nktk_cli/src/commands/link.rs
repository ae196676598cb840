//! Link command implementation.

use nktk_codec::{LinkConfig, LinkResolver};

/// Runs the link command.
pub fn run(config: LinkConfig, url: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = LinkResolver::new(config).fetch_descriptor(url)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        _ => {
            println!("GET {}", descriptor.url);
            println!("  response: {:?}", descriptor.response_type);
        }
    }

    Ok(())
}
