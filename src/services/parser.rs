//! Row parser for semicolon-delimited telemetry exports
//!
//! Export format: `"Data";"Device ID";"Sequence number";"Timestamp"`,
//! one record per line, each field optionally wrapped in quotes. Column
//! roles are positional: field 0 is the hex payload, field 1 the device
//! ID, the last field the timestamp. Anything in between is tolerated
//! and ignored so extra unmodeled columns do not break parsing.

use crate::domain::types::{DeviceId, RawRow};

/// Minimum field count for a data line
const MIN_FIELDS: usize = 4;

/// Parse raw export text into rows.
///
/// Header lines, empty lines, and lines with fewer than four fields are
/// silently skipped; row-level noise never aborts the batch.
pub fn parse_rows(text: &str) -> Vec<RawRow> {
    text.lines().filter_map(parse_line).collect()
}

/// Parse a single line, or None if it is not a data line
fn parse_line(line: &str) -> Option<RawRow> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields: Vec<String> = line.split(';').map(clean_field).collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let data = &fields[0];
    let timestamp = &fields[fields.len() - 1];

    // Header detection by content, not position: the export repeats the
    // header on concatenated files
    if data.contains("Data") && timestamp.contains("Timestamp") {
        return None;
    }

    Some(RawRow {
        data: data.clone(),
        device_id: DeviceId(fields[1].clone()),
        timestamp_raw: timestamp.clone(),
    })
}

/// Trim whitespace and remove every quote character from a field
fn clean_field(field: &str) -> String {
    field.trim().chars().filter(|&c| c != '"' && c != '\'').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_quoted_data_line() {
        let text = r#""64320064012C01F401900258";"1F06AD2";"42";"2024-06-01T12:00:00Z""#;
        let rows = parse_rows(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].data, "64320064012C01F401900258");
        assert_eq!(rows[0].device_id, DeviceId("1F06AD2".to_string()));
        assert_eq!(rows[0].timestamp_raw, "2024-06-01T12:00:00Z");
    }

    #[test]
    fn test_skips_header_by_content() {
        // Parseable-looking header with four fields is still excluded
        let text = r#""Data";"Device ID";"Sequence number";"Timestamp""#;
        assert!(parse_rows(text).is_empty());
    }

    #[test]
    fn test_header_rule_requires_both_fields() {
        // "Data" in the payload column alone does not mark a header
        let text = "Data;dev;1;2024-06-01 12:00:00";
        assert_eq!(parse_rows(text).len(), 1);
    }

    #[test]
    fn test_skips_short_and_empty_lines() {
        let text = "\n  \nA;B;C\nAABB;dev;1;2024-06-01 12:00:00\n";
        let rows = parse_rows(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].data, "AABB");
    }

    #[test]
    fn test_extra_columns_are_tolerated() {
        let text = "AABB;dev;1;2;3;extra;2024-06-01 12:00:00";
        let rows = parse_rows(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].device_id.as_str(), "dev");
        assert_eq!(rows[0].timestamp_raw, "2024-06-01 12:00:00");
    }

    #[test]
    fn test_clean_field_strips_quotes_and_whitespace() {
        assert_eq!(clean_field(" \"abc\" "), "abc");
        assert_eq!(clean_field("'ab\"c'"), "abc");
        assert_eq!(clean_field("  plain  "), "plain");
    }
}
