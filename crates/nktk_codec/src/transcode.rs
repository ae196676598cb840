//! URL-safe text form of packed bytes.
//!
//! Standard base64 with `-` and `_` in place of `+` and `/`. Output keeps
//! its `=` padding. Input is accepted in either alphabet, with or without
//! padding, and with whitespace or line breaks anywhere.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use tracing::trace;

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encodes bytes as URL-safe text.
pub fn encode_url_safe(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

/// Decodes URL-safe text.
///
/// Returns `None` if the text is not base64 or decodes to nothing.
pub fn decode_url_safe(text: &str) -> Option<Vec<u8>> {
    let normalized: String = text
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | ' ' | '\t'))
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    match URL_SAFE.decode(normalized) {
        Ok(bytes) if !bytes.is_empty() => Some(bytes),
        Ok(_) => None,
        Err(err) => {
            trace!(%err, "fragment text is not base64");
            None
        }
    }
}
