//! CSV import of timing system exports and scheduling rosters

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bracket_core::{normalize_heat_results, normalize_time_trial, HeatResult, RawResult};

use crate::config::Columns;
use crate::error::EventError;

/// Index of `name` in the header row
pub(crate) fn column(headers: &StringRecord, name: &str) -> Result<usize, EventError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| EventError::MissingColumn(name.to_string()))
}

/// Read raw result rows from a timing export.
///
/// With `with_heat` unset the heat column may be absent (time trial files).
pub fn read_raw_results<R: Read>(
    reader: R,
    columns: &Columns,
    with_heat: bool,
) -> Result<Vec<RawResult>, EventError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let surname = column(&headers, &columns.surname)?;
    let first_name = column(&headers, &columns.first_name)?;
    let time = column(&headers, &columns.time)?;
    let heat = if with_heat {
        Some(column(&headers, &columns.heat)?)
    } else {
        None
    };

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        rows.push(RawResult {
            line: record.position().map_or(0, |p| p.line() as usize),
            surname: field(surname),
            first_name: field(first_name),
            time: field(time),
            heat: heat.map(&field),
        });
    }
    Ok(rows)
}

/// Load and normalize one heat round's results file
pub fn load_heat_results(path: &Path, columns: &Columns) -> Result<Vec<HeatResult>, EventError> {
    let file = File::open(path).map_err(|e| EventError::io(path, e))?;
    let raw = read_raw_results(file, columns, true)?;
    let results = normalize_heat_results(&raw)?;
    tracing::info!(path = %path.display(), results = results.len(), "loaded heat results");
    Ok(results)
}

/// Load and normalize the time trial results file
pub fn load_time_trial(path: &Path, columns: &Columns) -> Result<Vec<HeatResult>, EventError> {
    let file = File::open(path).map_err(|e| EventError::io(path, e))?;
    let raw = read_raw_results(file, columns, false)?;
    let results = normalize_time_trial(&raw)?;
    tracing::info!(path = %path.display(), results = results.len(), "loaded time trial");
    Ok(results)
}

/// A roster file kept as raw records so every column survives export.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterFile {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

impl RosterFile {
    pub fn read<R: Read>(reader: R) -> Result<Self, EventError> {
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headers, records })
    }

    pub fn load(path: &Path) -> Result<Self, EventError> {
        let file = File::open(path).map_err(|e| EventError::io(path, e))?;
        Self::read(file)
    }
}
