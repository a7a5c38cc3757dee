//! Parser for the raw monitor log: repeated `ps` snapshots, each preceded by
//! a `date` line, with the `ps` header line acting as the block separator.

use chrono::{NaiveDateTime, NaiveTime};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Separator between snapshot blocks. The capture loop prints the `ps`
/// column header immediately before each `date` line, so the header text
/// (plus the day abbreviation the locale glues to it) delimits blocks.
pub const BLOCK_DELIMITER: &str = "%CPU %MEM ARGS mer.";

/// Layout of a block header, e.g. `02 Jan. 2024 11:00:00 UTC`. The trailing
/// timezone token is skipped; only the clock time survives into the record.
const HEADER_FORMAT: &str = "%d %b. %Y %H:%M:%S %Z";

/// One sample as captured. cpu and mem stay raw text here; the profile file
/// read path is where numeric validation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    pub time: NaiveTime,
    pub cpu: String,
    pub mem: String,
    pub process: String,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read monitor log: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid block header '{header}': {source}")]
    Header {
        header: String,
        source: chrono::ParseError,
    },
}

/// Reads the monitor log at `path` and parses it into samples.
pub fn load_monitor_log<P: AsRef<Path>>(path: P) -> Result<Vec<SampleRecord>, IngestError> {
    let raw = fs::read_to_string(path)?;
    parse_monitor_log(&raw)
}

/// Parses raw monitor-log text into an ordered sequence of samples.
///
/// A block whose header line does not parse aborts the whole run: a mangled
/// header means the capture itself is suspect, so no partial output. Sample
/// lines with fewer than three whitespace tokens are dropped without note.
pub fn parse_monitor_log(raw: &str) -> Result<Vec<SampleRecord>, IngestError> {
    let mut samples = Vec::new();
    for block in raw.split(BLOCK_DELIMITER) {
        if block.is_empty() {
            continue;
        }
        let mut lines = block.lines();
        let header = lines.next().unwrap_or("").trim();
        let stamp = NaiveDateTime::parse_from_str(header, HEADER_FORMAT).map_err(|source| {
            IngestError::Header {
                header: header.to_string(),
                source,
            }
        })?;
        // Calendar date and timezone are dropped on purpose: the chart keys
        // samples by clock time only, so runs spanning midnight fold over.
        let time = stamp.time();
        for line in lines {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 3 {
                continue;
            }
            samples.push(SampleRecord {
                time,
                cpu: tokens[0].to_string(),
                mem: tokens[1].to_string(),
                process: tokens[2..].join(" "),
            });
        }
    }
    Ok(samples)
}
