//! Ride-edge ingestion.
//!
//! Supports two upstream CSV shapes, detected by which columns are present:
//!
//! - **Edge schema**: one row per edge — `line, from_station, to_station, seconds|time`.
//! - **Sequential schema**: one row per station stop along a line —
//!   `line, station, time, cumulative_km?`. Consecutive rows on the same line
//!   form an edge; a decrease in cumulative distance breaks the chain (it
//!   signals a branch or a restart of the row order, not a real segment).

use std::fs;
use std::path::Path;

use log::warn;

use rail_core::{normalize_line_label, parse_seconds};

use crate::columns::pick_col;
use crate::encoding::decode;
use crate::error::{IngestError, IngestResult};

const LINE_SYNONYMS: &[&str] = &["line", "호선", "노선"];
const FROM_SYNONYMS: &[&str] = &["from_station", "from", "출발역", "시작역"];
const TO_SYNONYMS: &[&str] = &["to_station", "to", "도착역", "종료역"];
const STATION_SYNONYMS: &[&str] = &["station", "역명", "역"];
const SECONDS_SYNONYMS: &[&str] = &["seconds", "sec", "소요초", "time", "소요시간"];
const CUMULATIVE_SYNONYMS: &[&str] = &["cumulative_km", "누적거리", "distance_km", "distance"];

/// A canonical, undirected ride edge: `seconds` to travel `a -> b` on `line`.
#[derive(Debug, Clone, PartialEq)]
pub struct RideEdge {
    pub line: String,
    pub a: String,
    pub b: String,
    pub seconds: i64,
}

/// Row-level counters surfaced to the caller for logging and CLI summaries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLoadStats {
    pub dropped_rows: usize,
    pub duplicate_edges: usize,
}

enum Schema {
    Edge { line: usize, from: usize, to: usize, seconds: usize },
    Sequential { line: usize, station: usize, seconds: usize, cumulative: Option<usize> },
}

fn detect_schema(headers: &[String], path: &str) -> IngestResult<Schema> {
    let line = pick_col(headers, LINE_SYNONYMS);
    let seconds = pick_col(headers, SECONDS_SYNONYMS);

    if let (Some(line), Some(from), Some(to), Some(seconds)) = (
        line,
        pick_col(headers, FROM_SYNONYMS),
        pick_col(headers, TO_SYNONYMS),
        seconds,
    ) {
        return Ok(Schema::Edge { line, from, to, seconds });
    }

    if let (Some(line), Some(station), Some(seconds)) =
        (line, pick_col(headers, STATION_SYNONYMS), seconds)
    {
        return Ok(Schema::Sequential {
            line,
            station,
            seconds,
            cumulative: pick_col(headers, CUMULATIVE_SYNONYMS),
        });
    }

    Err(IngestError::SchemaUndetected { path: path.to_string() })
}

/// Load ride edges from a file path, auto-detecting encoding and schema.
pub fn load_ride_edges(path: &Path) -> IngestResult<(Vec<RideEdge>, EdgeLoadStats)> {
    let display = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| IngestError::InputUnreadable {
        path: display.clone(),
        source,
    })?;
    let text = decode(&bytes, &display)?;
    load_ride_edges_from_str(&text, &display)
}

/// Load ride edges from already-decoded CSV text. Split out from
/// [`load_ride_edges`] so loader logic can be exercised with small embedded
/// fixtures instead of temp files.
pub fn load_ride_edges_from_str(text: &str, path: &str) -> IngestResult<(Vec<RideEdge>, EdgeLoadStats)> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let schema = detect_schema(&headers, path)?;

    let mut stats = EdgeLoadStats::default();
    let mut edges = Vec::new();

    match schema {
        Schema::Edge { line, from, to, seconds } => {
            for record in reader.records() {
                let record = record?;
                let Some(line_cell) = record.get(line) else { continue };
                let Some(from_cell) = record.get(from) else { continue };
                let Some(to_cell) = record.get(to) else { continue };
                let Some(seconds_cell) = record.get(seconds) else { continue };

                let Some(secs) = parse_seconds(seconds_cell) else {
                    stats.dropped_rows += 1;
                    continue;
                };
                if secs <= 0 {
                    stats.dropped_rows += 1;
                    continue;
                }
                if from_cell.is_empty() || to_cell.is_empty() {
                    stats.dropped_rows += 1;
                    continue;
                }

                edges.push(RideEdge {
                    line: normalize_line_label(line_cell),
                    a: from_cell.to_string(),
                    b: to_cell.to_string(),
                    seconds: secs,
                });
            }
        }
        Schema::Sequential { line, station, seconds, cumulative } => {
            let mut prev: Option<(String, String, Option<f64>)> = None;
            for record in reader.records() {
                let record = record?;
                let Some(line_cell) = record.get(line) else { continue };
                let Some(station_cell) = record.get(station) else { continue };
                if station_cell.is_empty() {
                    continue;
                }
                let seconds_cell = record.get(seconds);
                let secs = seconds_cell.and_then(parse_seconds);
                let cum = cumulative
                    .and_then(|idx| record.get(idx))
                    .and_then(|cell| cell.trim().replace(',', "").parse::<f64>().ok());

                let cur_line = normalize_line_label(line_cell);
                let cur_station = station_cell.to_string();

                if let Some((prev_line, prev_station, prev_cum)) = &prev {
                    if *prev_line == cur_line {
                        let chain_continues = match (prev_cum, cum) {
                            (Some(p), Some(c)) => c >= *p,
                            _ => true,
                        };
                        if chain_continues {
                            match secs {
                                Some(s) if s > 0 => edges.push(RideEdge {
                                    line: cur_line.clone(),
                                    a: prev_station.clone(),
                                    b: cur_station.clone(),
                                    seconds: s,
                                }),
                                _ => stats.dropped_rows += 1,
                            }
                        }
                    }
                }

                prev = Some((cur_line, cur_station, cum));
            }
        }
    }

    let (deduped, duplicates) = dedup(edges);
    stats.duplicate_edges = duplicates;
    Ok((deduped, stats))
}

/// Collapse `(ln,a,b,s)` and `(ln,b,a,s)` into one entry. When the same
/// unordered pair appears with two different weights, the first one wins and
/// the conflict is logged and counted (mirrors `DuplicateEdge` in the error
/// design: non-fatal, first-encountered wins).
fn dedup(edges: Vec<RideEdge>) -> (Vec<RideEdge>, usize) {
    let mut seen: std::collections::HashMap<(String, String, String), i64> =
        std::collections::HashMap::new();
    let mut out = Vec::new();
    let mut duplicates = 0;

    for edge in edges {
        let (a, b) = if edge.a <= edge.b {
            (edge.a.clone(), edge.b.clone())
        } else {
            (edge.b.clone(), edge.a.clone())
        };
        let key = (edge.line.clone(), a, b);

        match seen.get(&key) {
            Some(existing) if *existing == edge.seconds => {
                duplicates += 1;
            }
            Some(_) => {
                warn!("duplicate edge {}:{}-{} with conflicting weight, keeping first", edge.line, edge.a, edge.b);
                duplicates += 1;
            }
            None => {
                seen.insert(key, edge.seconds);
                out.push(edge);
            }
        }
    }

    (out, duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_schema_loads() {
        let csv = "line,from_station,to_station,seconds\n1호선,A,B,120\n";
        let (edges, stats) = load_ride_edges_from_str(csv, "test.csv").unwrap();
        assert_eq!(edges, vec![RideEdge { line: "1호선".into(), a: "A".into(), b: "B".into(), seconds: 120 }]);
        assert_eq!(stats.dropped_rows, 0);
    }

    #[test]
    fn edge_schema_accepts_synonym_headers() {
        let csv = "호선,출발역,도착역,소요초\n1,A,B,01:30\n";
        let (edges, _) = load_ride_edges_from_str(csv, "test.csv").unwrap();
        assert_eq!(edges[0].line, "1호선");
        assert_eq!(edges[0].seconds, 90);
    }

    #[test]
    fn sequential_schema_forms_consecutive_edges() {
        let csv = "line,station,time,cumulative_km\n1호선,A,0,0\n1호선,B,120,1.2\n1호선,C,90,2.0\n";
        let (edges, _) = load_ride_edges_from_str(csv, "test.csv").unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], RideEdge { line: "1호선".into(), a: "A".into(), b: "B".into(), seconds: 120 });
        assert_eq!(edges[1], RideEdge { line: "1호선".into(), a: "B".into(), b: "C".into(), seconds: 90 });
    }

    #[test]
    fn sequential_schema_breaks_chain_on_distance_decrease() {
        let csv = "line,station,time,cumulative_km\n1호선,A,0,5.0\n1호선,B,120,1.0\n1호선,C,90,2.0\n";
        let (edges, _) = load_ride_edges_from_str(csv, "test.csv").unwrap();
        // A->B is dropped (distance decreased); B->C still forms.
        assert_eq!(edges, vec![RideEdge { line: "1호선".into(), a: "B".into(), b: "C".into(), seconds: 90 }]);
    }

    #[test]
    fn dedup_collapses_reverse_order_duplicates() {
        let csv = "line,from_station,to_station,seconds\n1호선,A,B,120\n1호선,B,A,120\n";
        let (edges, stats) = load_ride_edges_from_str(csv, "test.csv").unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(stats.duplicate_edges, 1);
    }

    #[test]
    fn non_positive_seconds_are_dropped() {
        let csv = "line,from_station,to_station,seconds\n1호선,A,B,0\n";
        let (edges, stats) = load_ride_edges_from_str(csv, "test.csv").unwrap();
        assert!(edges.is_empty());
        assert_eq!(stats.dropped_rows, 1);
    }

    #[test]
    fn undetected_schema_errors() {
        let csv = "foo,bar\n1,2\n";
        let err = load_ride_edges_from_str(csv, "test.csv").unwrap_err();
        assert!(matches!(err, IngestError::SchemaUndetected { .. }));
    }
}
