//! Inspect command implementation.

use nktk_codec::{decode_url_safe, CodecResult, Fragment, LegacyVersion, PackedReader};
use serde::Serialize;

/// Fragment inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Decoded length in bytes.
    pub length: usize,
    /// Version marker, if one could be read.
    pub marker: Option<i64>,
    /// Layout selected by the marker.
    pub layout: String,
    /// Fields in wire order.
    pub fields: Vec<FieldInfo>,
    /// Offset at which reading stopped on damaged input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damaged_at: Option<usize>,
    /// Hex dump of the bytes.
    pub hex: String,
}

/// A single field on the wire.
#[derive(Debug, Serialize)]
pub struct FieldInfo {
    /// Byte offset of the field.
    pub offset: usize,
    /// Field name.
    pub name: String,
    /// Decoded value.
    pub value: String,
}

/// Runs the inspect command.
pub fn run(fragment: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = decode_url_safe(fragment).ok_or("Fragment is not URL-safe base64")?;
    let result = inspect_bytes(&bytes);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

/// Walks the fields of a fragment's bytes.
pub fn inspect_bytes(bytes: &[u8]) -> InspectResult {
    let fragment = Fragment::parse(bytes);
    let mut result = InspectResult {
        length: bytes.len(),
        marker: fragment.marker(),
        layout: String::new(),
        fields: Vec::new(),
        damaged_at: None,
        hex: hex_encode(bytes),
    };

    match fragment {
        Fragment::Legacy { version, body } => {
            let base = bytes.len() - body.len();
            result.layout = format!("packed v{}", version.number());
            let mut reader = PackedReader::new(body);
            if walk_legacy(&mut reader, version, base, &mut result.fields).is_err() {
                result.damaged_at = Some(base + reader.position());
            }
        }
        Fragment::Schema(body) => {
            result.layout = "protobuf".to_string();
            result.fields.push(FieldInfo {
                offset: bytes.len() - body.len(),
                name: "message".to_string(),
                value: format!("{} bytes", body.len()),
            });
        }
        Fragment::Unknown(_) => {
            result.layout = "unknown".to_string();
            result.damaged_at = Some(0);
        }
    }

    result
}

fn walk_legacy(
    reader: &mut PackedReader<'_>,
    version: LegacyVersion,
    base: usize,
    fields: &mut Vec<FieldInfo>,
) -> CodecResult<()> {
    let mut offset = base + reader.position();
    let mut field = |name: String, value: String, offset: usize| {
        fields.push(FieldInfo {
            offset,
            name,
            value,
        })
    };

    let name = reader.read_text()?;
    field("name".to_string(), format!("{:?}", name), offset);

    offset = base + reader.position();
    let segment_count = reader.read_count()?;
    field("segments".to_string(), segment_count.to_string(), offset);
    for index in 0..segment_count {
        offset = base + reader.position();
        let point_count = reader.read_count()?;
        for _ in 0..point_count {
            reader.read_grid_point()?;
        }
        field(
            format!("segment[{}]", index),
            format!("{} points", point_count),
            offset,
        );
    }

    offset = base + reader.position();
    let color = reader.read_number()?;
    field("color".to_string(), color.to_string(), offset);
    offset = base + reader.position();
    let ticks = reader.read_flag()?;
    field("measure_ticks".to_string(), ticks.to_string(), offset);

    if version >= LegacyVersion::V3 {
        offset = base + reader.position();
        let hidden = reader.read_flag()?;
        field("hidden".to_string(), hidden.to_string(), offset);
    }

    if version >= LegacyVersion::V2 {
        offset = base + reader.position();
        let count = reader.read_count()?;
        field("waypoints".to_string(), count.to_string(), offset);
        if count > 0 {
            offset = base + reader.position();
            let mid = reader.read_grid_point()?;
            field("anchor".to_string(), format!("{},{}", mid.y, mid.x), offset);
            for index in 0..count {
                offset = base + reader.position();
                let label = reader.read_text()?;
                reader.read_number()?;
                let delta = reader.read_grid_point()?;
                field(
                    format!("waypoint[{}]", index),
                    format!("{:?} {:+},{:+}", label, delta.y, delta.x),
                    offset,
                );
            }
        }
    }

    if !reader.is_empty() {
        offset = base + reader.position();
        field(
            "trailing".to_string(),
            format!("{} bytes", reader.remaining().len()),
            offset,
        );
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("Fragment Inspection");
    println!("===================");
    println!();
    println!("Length: {} bytes", result.length);
    match result.marker {
        Some(marker) => println!("Marker: {}", marker),
        None => println!("Marker: unreadable"),
    }
    println!("Layout: {}", result.layout);
    println!();
    println!("Fields:");
    for field in &result.fields {
        println!("  @{:<5} {:<14} {}", field.offset, field.name, field.value);
    }
    if let Some(offset) = result.damaged_at {
        println!();
        println!("Damaged at offset {}", offset);
    }
    println!();
    println!("Bytes:");
    println!("  {}", result.hex);
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nktk_codec::{encode_legacy, PackedWriter, Point, TrackRecord, Waypoint};

    fn sample() -> Vec<u8> {
        let track = TrackRecord::new("Tour")
            .with_segment([Point::new(48.0, 11.0), Point::new(48.1, 11.1)])
            .with_waypoint(Waypoint::new("Hut", 48.05, 11.05));
        encode_legacy(&track).unwrap()
    }

    #[test]
    fn lists_fields_in_wire_order() {
        let result = inspect_bytes(&sample());
        assert_eq!(result.marker, Some(3));
        assert_eq!(result.layout, "packed v3");
        assert_eq!(result.damaged_at, None);

        let names: Vec<_> = result.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "name",
                "segments",
                "segment[0]",
                "color",
                "measure_ticks",
                "hidden",
                "waypoints",
                "anchor",
                "waypoint[0]"
            ]
        );
        // The name follows a one byte marker.
        assert_eq!(result.fields[0].offset, 1);
    }

    #[test]
    fn reports_damage_offset() {
        let mut bytes = sample();
        bytes.truncate(bytes.len() - 2);
        let result = inspect_bytes(&bytes);
        assert!(result.damaged_at.is_some());
        assert_eq!(result.fields.last().unwrap().name, "anchor");
    }

    #[test]
    fn missing_colour_is_damage() {
        let mut writer = PackedWriter::new();
        writer.write_number(1).unwrap();
        writer.write_text("old").unwrap();
        writer.write_count(0).unwrap();
        let bytes = writer.into_bytes();

        let result = inspect_bytes(&bytes);
        assert_eq!(result.layout, "packed v1");
        assert_eq!(result.damaged_at, Some(bytes.len()));
        assert_eq!(result.fields.last().unwrap().name, "segments");
    }

    #[test]
    fn unknown_marker() {
        let result = inspect_bytes(&[69]);
        assert_eq!(result.marker, Some(5));
        assert_eq!(result.layout, "unknown");
        assert_eq!(result.hex, "45");
    }
}
