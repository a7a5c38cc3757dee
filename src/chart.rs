//! The chart document served at `/data`: one cpu-over-time trace plus a
//! layout block, shaped for the chart page's `newPlot(data, layout)` call.

use chrono::NaiveTime;
use serde::Serialize;
use std::io;

use crate::store::Table;

/// Hard-coded x-axis window, left over from the capture run the chart was
/// first tuned on. Not derived from the data.
pub const XAXIS_RANGE: [&str; 2] = ["10:58:26", "18:14:58"];
/// Hard-coded y-axis window, likewise not data-driven.
pub const YAXIS_RANGE: [u32; 2] = [0, 500];

#[derive(Debug, Serialize)]
pub struct ChartDocument {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One plotted series; `x` and `y` are parallel columns of equal length.
/// Times serialize as `HH:MM:SS`, same as the profile file.
#[derive(Debug, Serialize)]
pub struct Trace {
    pub x: Vec<NaiveTime>,
    pub y: Vec<f64>,
    pub name: &'static str,
    pub mode: &'static str,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Layout {
    pub title: &'static str,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
}

#[derive(Debug, Serialize)]
pub struct XAxis {
    #[serde(rename = "type")]
    pub axis_type: &'static str,
    pub title: &'static str,
    pub range: [&'static str; 2],
}

#[derive(Debug, Serialize)]
pub struct YAxis {
    #[serde(rename = "type")]
    pub axis_type: &'static str,
    pub title: &'static str,
    pub color: &'static str,
    pub range: [u32; 2],
}

impl ChartDocument {
    /// Builds the cpu-over-time document. Consumes the table: the time and
    /// cpu columns move into the trace, the mem and process columns drop.
    pub fn cpu_over_time(table: Table) -> Self {
        ChartDocument {
            data: vec![Trace {
                x: table.time,
                y: table.cpu,
                name: "cpu",
                mode: "line",
                trace_type: "scatter",
            }],
            layout: Layout {
                title: "Cpu Usage over time",
                xaxis: XAxis {
                    axis_type: "date",
                    title: "heure",
                    range: XAXIS_RANGE,
                },
                yaxis: YAxis {
                    axis_type: "linear",
                    title: "cpu usage %",
                    color: "blue",
                    range: YAXIS_RANGE,
                },
            },
        }
    }

    /// Streams the encoded document to `w`, for callers outside the HTTP
    /// path. On failure `w` may hold a partial document.
    pub fn write_to<W: io::Write>(&self, w: W) -> Result<(), serde_json::Error> {
        serde_json::to_writer(w, self)
    }
}
