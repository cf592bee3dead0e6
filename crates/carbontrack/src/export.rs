//! CSV export of activity records.

use std::io::Write;

use crate::activity::ActivityRecord;
use crate::error::Result;

/// Default file name for exports.
pub const DEFAULT_EXPORT_FILE: &str = "my_footprint.csv";

/// Column headers, in order.
pub const HEADER: [&str; 4] = ["Date", "Category", "Value", "CO2 Equivalent (kg)"];

/// Write `records` as CSV to `writer`, one row per record, in the order given.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ActivityRecord>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    let mut rows = 0;
    for record in records {
        wtr.write_record([
            record.date().to_string(),
            record.category().label().to_string(),
            record.raw_value().to_string(),
            record.co2_equivalent().to_string(),
        ])?;
        rows += 1;
    }

    wtr.flush()?;
    Ok(rows)
}
