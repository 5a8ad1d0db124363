//! Roster export for the scheduling tool
//!
//! The scheduling tool's roster is read as is, every racer's next heat is
//! written into its heat columns, and the file is written back with all
//! other columns untouched.

use csv::{StringRecord, WriterBuilder};
use std::io::Write;

use bracket_core::{roster_assignments, BracketTable, Competitor};

use crate::config::RosterColumns;
use crate::error::EventError;
use crate::import::{column, RosterFile};

/// Fill the heat columns of `roster` for everyone racing in `round`.
///
/// Rows with no surname are dropped. Heat columns missing from the header
/// row are appended.
pub fn fill_roster(
    roster: &RosterFile,
    table: &BracketTable,
    round: u8,
    columns: &RosterColumns,
) -> Result<RosterFile, EventError> {
    let surname = column(&roster.headers, &columns.surname)?;
    let first_name = column(&roster.headers, &columns.first_name)?;

    let records: Vec<&StringRecord> = roster
        .records
        .iter()
        .filter(|r| !r.get(surname).unwrap_or_default().trim().is_empty())
        .collect();
    let dropped = roster.records.len() - records.len();
    if dropped > 0 {
        tracing::warn!(dropped, "dropping roster rows without a surname");
    }

    let competitors: Vec<Competitor> = records
        .iter()
        .map(|r| {
            Competitor::new(
                r.get(first_name).unwrap_or_default(),
                r.get(surname).unwrap_or_default(),
            )
        })
        .collect();
    let assignments = roster_assignments(table, round, &competitors)?;

    let mut headers = roster.headers.clone();
    let mut target = |name: &str| match column(&headers, name) {
        Ok(index) => index,
        Err(_) => {
            headers.push_field(name);
            headers.len() - 1
        }
    };
    let long = target(&columns.long);
    let short = target(&columns.short);
    let class_no = target(&columns.class_no);

    let filled = records
        .iter()
        .zip(&assignments)
        .map(|(record, assignment)| {
            let heat = assignment.heat;
            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
            if fields.len() < headers.len() {
                fields.resize(headers.len(), String::new());
            }
            fields[long] = heat.long_id();
            fields[short] = heat.short_id();
            fields[class_no] = heat.number().to_string();
            StringRecord::from(fields)
        })
        .collect();

    Ok(RosterFile {
        headers,
        records: filled,
    })
}

pub fn write_roster<W: Write>(roster: &RosterFile, writer: W) -> Result<(), EventError> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);
    wtr.write_record(&roster.headers)?;
    for record in &roster.records {
        wtr.write_record(record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
