//! CSV export for hour results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::HourResult;

/// Column header for CSV export.
const HEADER: &str = "day,hour,generation_wh,power_used_wh,battery_charge_wh,\
                       curtailed_wh,appliances_running";

/// Separator between appliance names in the last column.
const NAME_SEPARATOR: &str = ";";

/// Exports hour results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per simulated hour.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[HourResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes hour results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[HourResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            r.day.to_string(),
            r.hour.to_string(),
            format!("{:.2}", r.generation),
            format!("{:.2}", r.power_used),
            format!("{:.2}", r.battery_charge),
            format!("{:.2}", r.curtailed),
            r.appliances_running.join(NAME_SEPARATOR),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_hour(slot: usize) -> HourResult {
        HourResult {
            day: slot / 24,
            hour: (slot % 24) as u32,
            generation: 300.0,
            power_used: 650.0,
            battery_charge: 1650.0,
            curtailed: 0.0,
            appliances_running: vec!["Pump".to_string(), "Fridge, small".to_string()],
        }
    }

    fn render(results: &[HourResult]) -> String {
        let mut buf = Vec::new();
        write_csv(results, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn header_matches_schema() {
        let output = render(&[make_hour(0)]);
        let first_line = output.lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "day,hour,generation_wh,power_used_wh,battery_charge_wh,curtailed_wh,appliances_running"
        );
    }

    #[test]
    fn row_count_matches_hour_count() {
        let results: Vec<HourResult> = (0..48).map(make_hour).collect();
        // 1 header + 48 data rows
        assert_eq!(render(&results).lines().count(), 49);
    }

    #[test]
    fn deterministic_output() {
        let results: Vec<HourResult> = (0..5).map(make_hour).collect();
        assert_eq!(render(&results), render(&results));
    }

    #[test]
    fn rows_parse_back() {
        let results: Vec<HourResult> = (23..26).map(make_hour).collect();
        let output = render(&results);

        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().filter_map(Result::ok).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[1][0], "1");
        assert_eq!(&rows[1][1], "0");
        for row in &rows {
            for i in 2..6 {
                assert!(row[i].parse::<f64>().is_ok(), "column {i} should parse as f64");
            }
            // embedded comma survives quoting
            assert_eq!(&row[6], "Pump;Fridge, small");
        }
    }
}
