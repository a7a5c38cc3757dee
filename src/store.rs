//! The intermediate profile file: a disposable CSV sitting between the
//! generation step and the HTTP path. Write side takes samples as captured;
//! read side is where rows become typed or get dropped.

use chrono::NaiveTime;
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::ingest::SampleRecord;

pub const PROFILE_HEADER: [&str; 4] = ["time", "cpu", "mem", "proc"];
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One decoded sample from the profile file.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub time: NaiveTime,
    pub cpu: f64,
    pub mem: f64,
    pub process: String,
}

/// Column-oriented view of the profile file: four parallel sequences of
/// equal length, index i across all four describing one sample. Built fresh
/// per read and dropped once the response is written.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Table {
    pub time: Vec<NaiveTime>,
    pub cpu: Vec<f64>,
    pub mem: Vec<f64>,
    pub process: Vec<String>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    fn push(&mut self, row: Row) {
        self.time.push(row.time);
        self.cpu.push(row.cpu);
        self.mem.push(row.mem);
        self.process.push(row.process);
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("profile CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("profile file has no header record")]
    MissingHeader,
}

/// Why a single row was rejected during decode. These never abort a read;
/// the row is logged and skipped.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("record not the good length: {0} fields")]
    Length(usize),
    #[error("bad time field: {0}")]
    Time(chrono::ParseError),
    #[error("bad cpu field: {0}")]
    Cpu(std::num::ParseFloatError),
    #[error("bad mem field: {0}")]
    Mem(std::num::ParseFloatError),
}

/// Writes the header record and one record per sample to `w`.
pub fn write_profile<W: io::Write>(w: W, samples: &[SampleRecord]) -> Result<(), StoreError> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(PROFILE_HEADER)?;
    for sample in samples {
        let time = sample.time.format(TIME_FORMAT).to_string();
        wtr.write_record([
            time.as_str(),
            sample.cpu.as_str(),
            sample.mem.as_str(),
            sample.process.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Creates (or truncates) the profile file at `path` and writes `samples`.
pub fn save_profile<P: AsRef<Path>>(path: P, samples: &[SampleRecord]) -> Result<(), StoreError> {
    write_profile(File::create(path)?, samples)
}

/// Reads the profile file at `path` into a [`Table`].
pub fn read_profile<P: AsRef<Path>>(path: P) -> Result<Table, StoreError> {
    decode_profile(File::open(path)?)
}

/// Decodes profile CSV from `r` into a [`Table`].
///
/// The header record is discarded; its absence is the only fatal condition.
/// After that, end-of-input is the only thing that stops the read: records
/// that fail to decode are logged and skipped, per-row.
pub fn decode_profile<R: io::Read>(r: R) -> Result<Table, StoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(r);
    let mut records = rdr.records();

    match records.next() {
        None => return Err(StoreError::MissingHeader),
        Some(Err(e)) => return Err(e.into()),
        Some(Ok(_header)) => {}
    }

    let mut table = Table::default();
    for record in records {
        let record = match record {
            Ok(rec) => rec,
            Err(e) => {
                warn!(error = %e, "skipping unreadable profile record");
                continue;
            }
        };
        match decode_row(&record) {
            Ok(row) => table.push(row),
            Err(e) => {
                warn!(record = ?record, error = %e, "skipping undecodable profile row");
            }
        }
    }
    Ok(table)
}

/// Decodes one CSV record into a [`Row`]. Fields past the fourth are ignored.
pub fn decode_row(record: &csv::StringRecord) -> Result<Row, DecodeError> {
    if record.len() < 4 {
        return Err(DecodeError::Length(record.len()));
    }
    let time = NaiveTime::parse_from_str(&record[0], TIME_FORMAT).map_err(DecodeError::Time)?;
    let cpu = record[1].parse::<f64>().map_err(DecodeError::Cpu)?;
    let mem = record[2].parse::<f64>().map_err(DecodeError::Mem)?;
    Ok(Row {
        time,
        cpu,
        mem,
        process: record[3].to_string(),
    })
}
