//! Timestamp normalization
//!
//! Raw timestamp strings are parsed permissively; anything unparsable
//! drops the row (data-quality filter, not an error). Naive timestamps
//! are interpreted as UTC, then everything is converted to the fixed
//! display offset so all downstream arithmetic and labels share one zone.

use crate::domain::types::{NormalizedRow, RawRow};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

/// Naive formats accepted when the string carries no zone designator
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Zoned formats that are not RFC 3339 (space separator before offset)
const ZONED_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f %:z"];

/// Drop rows with unparsable timestamps and convert the rest to the
/// display zone. Row order is preserved.
pub fn normalize_rows(rows: Vec<RawRow>, display_offset: FixedOffset) -> Vec<NormalizedRow> {
    rows.into_iter()
        .filter_map(|row| match parse_timestamp(&row.timestamp_raw) {
            Some(utc) => Some(NormalizedRow {
                data: row.data,
                device_id: row.device_id,
                timestamp: utc.with_timezone(&display_offset),
            }),
            None => {
                debug!(raw = %row.timestamp_raw, device = %row.device_id, "timestamp_unparsable");
                None
            }
        })
        .collect()
}

/// Permissive timestamp parse; naive strings are assumed UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::DeviceId;
    use chrono::Timelike;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn raw_row(ts: &str) -> RawRow {
        RawRow {
            data: "64320064012C01F401900258".to_string(),
            device_id: DeviceId("dev".to_string()),
            timestamp_raw: ts.to_string(),
        }
    }

    #[test]
    fn test_rfc3339_with_zone() {
        let dt = parse_timestamp("2024-06-01T12:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_naive_assumed_utc() {
        let dt = parse_timestamp("2024-06-01 12:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_fractional_seconds() {
        assert!(parse_timestamp("2024-06-01T12:00:00.123").is_some());
        assert!(parse_timestamp("2024-06-01 12:00:00.500+00:00").is_some());
    }

    #[test]
    fn test_unparsable_returns_none() {
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_normalize_converts_to_display_zone() {
        let rows = normalize_rows(vec![raw_row("2024-06-01T12:00:00Z")], jst());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].timestamp.hour(), 21); // 12:00 UTC = 21:00 JST
        assert_eq!(rows[0].timestamp.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_normalize_drops_unparsable_rows() {
        let rows = normalize_rows(
            vec![raw_row("garbage"), raw_row("2024-06-01 12:00:00")],
            jst(),
        );
        assert_eq!(rows.len(), 1);
    }
}
