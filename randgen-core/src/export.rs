//! Export — JSON and CSV renderings of tallies and distributions.

use anyhow::{Context, Result};

use crate::batch::Tally;
use crate::distribution::Distribution;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `Tally` to pretty JSON.
pub fn export_tally_json(tally: &Tally) -> Result<String> {
    serde_json::to_string_pretty(tally).context("failed to serialize Tally to JSON")
}

/// Serialize a `Distribution` (values, merged probabilities, cumulative) to pretty JSON.
pub fn export_distribution_json(distribution: &Distribution) -> Result<String> {
    serde_json::to_string_pretty(distribution)
        .context("failed to serialize Distribution to JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export a tally as CSV.
///
/// Columns: value, count, observed, expected
pub fn export_tally_csv(tally: &Tally) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["value", "count", "observed", "expected"])?;
    for row in &tally.rows {
        wtr.write_record([
            &row.value.to_string(),
            &row.count.to_string(),
            &format!("{:.6}", row.observed),
            &format!("{:.6}", row.expected),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tally() -> Tally {
        let dist = Distribution::build(&[1, 2, 3], &[0.3, 0.3, 0.4]).unwrap();
        Tally::from_samples(&dist, &[1, 2, 2, 3])
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = export_tally_csv(&sample_tally()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "value,count,observed,expected");
        assert_eq!(lines[1], "1,1,0.250000,0.300000");
        assert_eq!(lines[2], "2,2,0.500000,0.300000");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn json_contains_rows() {
        let json = export_tally_json(&sample_tally()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["total"], 4);
        assert_eq!(parsed["rows"][1]["value"], 2);
        assert_eq!(parsed["rows"][1]["count"], 2);
    }

    #[test]
    fn distribution_json_lists_cumulative() {
        let dist = Distribution::build(&[1, 2, 2, 3], &[0.1, 0.2, 0.3, 0.4]).unwrap();
        let json = export_distribution_json(&dist).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["values"], serde_json::json!([1, 2, 3]));
        assert_eq!(parsed["cumulative"], serde_json::json!([0.1, 0.6, 1.0]));
    }
}
