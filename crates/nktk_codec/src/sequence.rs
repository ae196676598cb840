//! Fragment sequences and share URLs.
//!
//! A share URL carries one or more fragments after `nktk=` in its hash,
//! joined by [`FRAGMENT_SEPARATOR`].

use tracing::trace;

use crate::error::CodecResult;
use crate::fragment::{decode_fragment, encode_fragment};
use crate::track::{DecodedTrack, TrackRecord};

/// Joins fragments in a sequence.
pub const FRAGMENT_SEPARATOR: char = '/';

/// Key that introduces a fragment sequence in a URL hash.
pub const SEQUENCE_KEY: &str = "nktk=";

/// Decodes a `/`-separated fragment sequence.
///
/// Empty fragments are skipped. Each remaining fragment yields exactly one
/// result, in input order, whether or not it is damaged.
///
/// # Errors
///
/// Only errors that do not describe damaged input are returned.
pub fn decode_sequence(text: &str) -> CodecResult<Vec<DecodedTrack>> {
    decode_fragments(text.split(FRAGMENT_SEPARATOR))
}

/// Decodes an already split fragment sequence.
///
/// # Errors
///
/// See [`decode_sequence`].
pub fn decode_fragments<I>(fragments: I) -> CodecResult<Vec<DecodedTrack>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fragments
        .into_iter()
        .filter(|fragment| !fragment.as_ref().is_empty())
        .map(|fragment| decode_fragment(fragment.as_ref()))
        .collect()
}

/// Encodes tracks as a fragment sequence, one fragment per track.
///
/// # Errors
///
/// Returns [`CodecError::OutOfRange`](crate::CodecError::OutOfRange) if any
/// track holds a value that cannot be packed.
pub fn encode_sequence<'a, I>(tracks: I) -> CodecResult<String>
where
    I: IntoIterator<Item = &'a TrackRecord>,
{
    let fragments = tracks
        .into_iter()
        .map(encode_fragment)
        .collect::<CodecResult<Vec<_>>>()?;
    Ok(fragments.join(&FRAGMENT_SEPARATOR.to_string()))
}

/// Builds the hash parameter `nktk=<sequence>` for a share URL.
///
/// # Errors
///
/// See [`encode_sequence`].
pub fn share_parameter<'a, I>(tracks: I) -> CodecResult<String>
where
    I: IntoIterator<Item = &'a TrackRecord>,
{
    Ok(format!("{SEQUENCE_KEY}{}", encode_sequence(tracks)?))
}

/// Decodes the tracks embedded in a share URL.
///
/// Everything after the first `nktk=` that follows the `#` is read as a
/// fragment sequence. Returns `Ok(None)` when the URL has no hash or no
/// `nktk=` in it.
///
/// # Errors
///
/// See [`decode_sequence`].
pub fn parse_track_url(url: &str) -> CodecResult<Option<Vec<DecodedTrack>>> {
    let Some(hash) = url.find('#') else {
        return Ok(None);
    };
    let after_hash = &url[hash + 1..];
    let Some(start) = after_hash.find(SEQUENCE_KEY) else {
        trace!("url hash has no track sequence");
        return Ok(None);
    };
    decode_sequence(&after_hash[start + SEQUENCE_KEY.len()..]).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::{Point, Waypoint, DEFAULT_TRACK_NAME};

    fn track(name: &str, lat: f64) -> TrackRecord {
        TrackRecord::new(name)
            .with_segment([Point::new(lat, 30.0), Point::new(lat + 0.01, 30.02)])
            .with_waypoint(Waypoint::new("Ö", lat, 30.0))
    }

    #[test]
    fn corrupt_fragment_does_not_affect_siblings() {
        let first = encode_fragment(&track("first", 10.0)).unwrap();
        let last = encode_fragment(&track("last", 20.0)).unwrap();
        let results = decode_fragments([first.as_str(), "not-valid-base64!!", last.as_str()]).unwrap();

        assert_eq!(results.len(), 3);
        assert!(!results[0].is_corrupt());
        assert_eq!(results[0].track.name, "first");
        assert!(results[1].is_corrupt());
        assert_eq!(results[1].track.name, DEFAULT_TRACK_NAME);
        assert!(!results[2].is_corrupt());
        assert_eq!(results[2].track.name, "last");
    }

    #[test]
    fn empty_fragments_are_skipped() {
        let one = encode_fragment(&track("one", 1.0)).unwrap();
        let results = decode_sequence(&format!("/{one}//{one}/")).unwrap();
        assert_eq!(results.len(), 2);
        assert!(decode_sequence("").unwrap().is_empty());
        assert!(decode_sequence("///").unwrap().is_empty());
    }

    #[test]
    fn sequence_roundtrip() {
        let tracks = [track("a", 1.0), track("b", -45.0), track("c", 80.0)];
        let text = encode_sequence(&tracks).unwrap();
        assert_eq!(text.matches(FRAGMENT_SEPARATOR).count(), 2);

        let names: Vec<_> = decode_sequence(&text)
            .unwrap()
            .into_iter()
            .map(|result| result.track.name)
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn share_url_roundtrip() {
        let tracks = [track("shared", 42.0)];
        let url = format!("https://nakarte.me/#m=5/42/30&{}", share_parameter(&tracks).unwrap());
        let results = parse_track_url(&url).unwrap().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].track.name, "shared");
        assert_eq!(results[0].track.waypoints[0].label, "Ö");
    }

    #[test]
    fn urls_without_tracks() {
        assert_eq!(parse_track_url("https://nakarte.me/").unwrap(), None);
        assert_eq!(parse_track_url("https://nakarte.me/#m=5/1/2").unwrap(), None);
        assert_eq!(parse_track_url("https://x.org/?nktk=abc#m=1").unwrap(), None);
    }

    #[test]
    fn empty_sequence_in_url() {
        assert_eq!(parse_track_url("https://nakarte.me/#nktk=").unwrap(), Some(vec![]));
    }
}
