//! Timetable loading from CSV.
//!
//! Each row describes one vehicle trip between two consecutive stops. The
//! header row is skipped and columns are read by position, so files whose
//! header names differ slightly still load.
//!
//! Loading is lenient per row: a row that fails to parse is logged and
//! skipped, and only I/O or CSV framing failures abort the load.

mod error;

pub use error::{IngestError, RowError};

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::{info, warn};

use crate::domain::{Coordinates, LineId, ScheduleTime, StopId};
use crate::graph::TripRecord;

/// One raw CSV row, in column order.
#[derive(Deserialize)]
struct Row {
    _id: IgnoredAny,
    _id2: IgnoredAny,
    _company: IgnoredAny,
    line: String,
    departure_time: String,
    arrival_time: String,
    start_stop: String,
    end_stop: String,
    start_stop_lat: f64,
    start_stop_lon: f64,
    end_stop_lat: f64,
    end_stop_lon: f64,
}

impl TryFrom<Row> for TripRecord {
    type Error = RowError;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let time = |field: &'static str, value: &str| {
            ScheduleTime::parse(value).map_err(|error| RowError::Time { field, error })
        };

        let start = StopId::parse(&row.start_stop)?;
        let end = StopId::parse(&row.end_stop)?;
        if start == end {
            return Err(RowError::SelfLoop(start));
        }

        let start_location = located(&start, row.start_stop_lat, row.start_stop_lon)?;
        let end_location = located(&end, row.end_stop_lat, row.end_stop_lon)?;

        Ok(TripRecord {
            line: LineId::parse(&row.line)?,
            start,
            end,
            departure: time("departure_time", &row.departure_time)?,
            arrival: time("arrival_time", &row.arrival_time)?,
            start_location,
            end_location,
        })
    }
}

fn located(stop: &StopId, lat: f64, lon: f64) -> Result<Coordinates, RowError> {
    let location = Coordinates::new(lat, lon);
    if location.is_valid() {
        Ok(location)
    } else {
        Err(RowError::InvalidCoordinates {
            stop: stop.clone(),
            lat,
            lon,
        })
    }
}

fn parse_row(raw: &csv::StringRecord) -> Result<TripRecord, RowError> {
    let row: Row = raw.deserialize(None)?;
    TripRecord::try_from(row)
}

/// Read timetable rows from any reader.
///
/// # Examples
///
/// ```
/// use transit_planner::ingest::read_csv;
///
/// let data = "\
/// id,id2,company,line,departure_time,arrival_time,start_stop,end_stop,start_stop_lat,start_stop_lon,end_stop_lat,end_stop_lon
/// 0,0,MPK,A,08:00:00,08:10:00,Stop1,Stop2,51.10,17.03,51.11,17.04
/// ";
///
/// let records = read_csv(data.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].line.as_str(), "A");
/// ```
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<TripRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut raw = csv::StringRecord::new();

    while reader.read_record(&mut raw)? {
        match parse_row(&raw) {
            Ok(record) => records.push(record),
            Err(error) => {
                skipped += 1;
                warn!(
                    line = raw.position().map_or(0, |p| p.line()),
                    %error,
                    "skipping timetable row"
                );
            }
        }
    }

    info!(rows = records.len(), skipped, "timetable read");
    Ok(records)
}

/// Read timetable rows from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<TripRecord>, IngestError> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading timetable");
    let file = File::open(path)?;
    read_csv(file)
}
