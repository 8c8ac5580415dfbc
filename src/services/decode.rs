//! Payload decoder
//!
//! Message layout (12 bytes, hex encoded):
//! - Byte 0: supply voltage, `v * 0.0125 + 1.0` volts
//! - Byte 1: battery percentage, taken as-is
//! - Bytes 2-11: five big-endian u16 distances in millimeters,
//!   newest first
//!
//! The device batches five readings at two-minute intervals into one
//! transmitted message; the message timestamp belongs to the newest
//! reading, so sample `i` is stamped `timestamp - i * 2min`.

use crate::domain::types::{
    DecodeOutcome, NormalizedRow, Sample, SkipReason, SAMPLES_PER_MESSAGE,
};
use chrono::Duration;

/// Hex characters required for one full message
const PAYLOAD_HEX_CHARS: usize = 24;

/// Spacing between consecutive readings in one message
const SAMPLE_SPACING_MINUTES: i64 = 2;

const VOLTAGE_SCALE: f64 = 0.0125;
const VOLTAGE_OFFSET_V: f64 = 1.0;

/// Decode one row's hex payload into five samples, or a skip.
///
/// The hex field is sanitized first (every non-hex character removed) so
/// separators or stray whitespace inside the exported payload do not
/// count against the length check. Undersized payloads and hex decode
/// failures skip the row rather than aborting the batch.
pub fn decode_payload(row: &NormalizedRow) -> DecodeOutcome {
    let sanitized: String = row.data.chars().filter(char::is_ascii_hexdigit).collect();

    if sanitized.len() < PAYLOAD_HEX_CHARS {
        return DecodeOutcome::Skipped(SkipReason::TruncatedPayload {
            hex_chars: sanitized.len(),
        });
    }

    // Sanitized chars are ASCII, so byte indexing is safe
    let bytes = match hex::decode(&sanitized[..PAYLOAD_HEX_CHARS]) {
        Ok(bytes) => bytes,
        Err(_) => return DecodeOutcome::Skipped(SkipReason::MalformedHex),
    };

    let voltage_v = f64::from(bytes[0]) * VOLTAGE_SCALE + VOLTAGE_OFFSET_V;
    let battery_pct = bytes[1];

    let samples: [Sample; SAMPLES_PER_MESSAGE] = std::array::from_fn(|i| {
        let offset = 2 + i * 2;
        let distance_mm = u16::from_be_bytes([bytes[offset], bytes[offset + 1]]);
        Sample {
            timestamp: row.timestamp - Duration::minutes(i as i64 * SAMPLE_SPACING_MINUTES),
            distance_mm,
            voltage_v,
            battery_pct,
            device_id: row.device_id.clone(),
        }
    });

    DecodeOutcome::Samples(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DeviceId;
    use chrono::{FixedOffset, TimeZone};

    fn row(data: &str) -> NormalizedRow {
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        NormalizedRow {
            data: data.to_string(),
            device_id: DeviceId("1F06AD2".to_string()),
            timestamp: jst.with_ymd_and_hms(2024, 6, 1, 21, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_reference_payload() {
        // voltage byte 0x64 = 100 -> 2.25 V, battery 0x32 = 50
        let DecodeOutcome::Samples(samples) = decode_payload(&row("64320064012C01F401900258"))
        else {
            panic!("expected samples");
        };

        let distances: Vec<u16> = samples.iter().map(|s| s.distance_mm).collect();
        assert_eq!(distances, vec![100, 300, 500, 400, 600]);

        for sample in &samples {
            assert!((sample.voltage_v - 2.25).abs() < 1e-9);
            assert_eq!(sample.battery_pct, 50);
            assert_eq!(sample.device_id.as_str(), "1F06AD2");
        }
    }

    #[test]
    fn test_timestamps_decrease_two_minutes_newest_first() {
        let DecodeOutcome::Samples(samples) = decode_payload(&row("64320064012C01F401900258"))
        else {
            panic!("expected samples");
        };

        for (i, sample) in samples.iter().enumerate() {
            let expected = samples[0].timestamp - Duration::minutes(i as i64 * 2);
            assert_eq!(sample.timestamp, expected);
        }
        // Strictly decreasing: offsets 0, 2, 4, 6, 8 minutes before the row
        for pair in samples.windows(2) {
            assert_eq!(pair[0].timestamp - pair[1].timestamp, Duration::minutes(2));
        }
    }

    #[test]
    fn test_voltage_decode_is_linear() {
        let DecodeOutcome::Samples(low) = decode_payload(&row("0000000000000000000000000000"))
        else {
            panic!("expected samples");
        };
        assert!((low[0].voltage_v - 1.0).abs() < 1e-9);

        let DecodeOutcome::Samples(high) = decode_payload(&row("C800000000000000000000000000"))
        else {
            panic!("expected samples");
        };
        assert!((high[0].voltage_v - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_short_payload_is_skipped() {
        let outcome = decode_payload(&row("643200"));
        assert_eq!(
            outcome,
            DecodeOutcome::Skipped(SkipReason::TruncatedPayload { hex_chars: 6 })
        );
    }

    #[test]
    fn test_non_hex_characters_are_stripped_before_length_check() {
        // 24 hex chars split by separators still decodes
        let outcome = decode_payload(&row("64 32:0064-012C 01F4 0190 0258"));
        assert!(matches!(outcome, DecodeOutcome::Samples(_)));

        // 23 hex chars padded with junk does not
        let outcome = decode_payload(&row("6432 0064 012C 01F4 0190 025 zz"));
        assert!(matches!(
            outcome,
            DecodeOutcome::Skipped(SkipReason::TruncatedPayload { hex_chars: 23 })
        ));
    }

    #[test]
    fn test_extra_trailing_hex_is_ignored() {
        let DecodeOutcome::Samples(samples) =
            decode_payload(&row("64320064012C01F401900258FFFFFFFF"))
        else {
            panic!("expected samples");
        };
        assert_eq!(samples[4].distance_mm, 600);
    }
}
