//! Transfer-penalty ingestion.
//!
//! Recognized columns: `station`, optional `line_from`/`line_to`, and a
//! seconds-or-expression column. A row with both line columns filled (and
//! differing after normalization) records a pair override; otherwise it
//! records a per-station default.

use std::fs;
use std::path::Path;

use log::warn;

use rail_core::{normalize_line_label, parse_seconds};

use crate::columns::pick_col;
use crate::encoding::decode;
use crate::error::{IngestError, IngestResult};

const STATION_SYNONYMS: &[&str] = &["station", "역명", "역"];
const LINE_FROM_SYNONYMS: &[&str] = &["line_from", "from_line", "환승전호선", "출발호선"];
const LINE_TO_SYNONYMS: &[&str] = &["line_to", "to_line", "환승후호선", "도착호선"];
const SECONDS_SYNONYMS: &[&str] = &["seconds", "sec", "소요초", "time", "환승시간"];

/// Overrides for transfer weight at two granularities: per-station default,
/// and per-`(station, line_from, line_to)` pair. Pair lookups are symmetric
/// in the line arguments — the lookup side, not storage, handles that.
#[derive(Debug, Default, Clone)]
pub struct TransferOverrides {
    per_station: std::collections::HashMap<String, i64>,
    per_pair: std::collections::HashMap<(String, String, String), i64>,
}

impl TransferOverrides {
    /// Resolve the transfer weight for `station` crossing from `from_line`
    /// to `to_line`, using precedence pair → per-station → `fallback`.
    pub fn resolve(&self, station: &str, from_line: &str, to_line: &str, fallback: i64) -> i64 {
        let forward = (station.to_string(), from_line.to_string(), to_line.to_string());
        let reverse = (station.to_string(), to_line.to_string(), from_line.to_string());

        self.per_pair
            .get(&forward)
            .or_else(|| self.per_pair.get(&reverse))
            .copied()
            .or_else(|| self.per_station.get(station).copied())
            .unwrap_or(fallback)
    }
}

/// Row-level counters surfaced to the caller for logging and CLI summaries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransferLoadStats {
    pub dropped_rows: usize,
    pub duplicate_overrides: usize,
    pub per_station_defaults: usize,
    pub pair_overrides: usize,
}

/// Load transfer overrides from a file path, auto-detecting encoding.
pub fn load_transfer_overrides(path: &Path) -> IngestResult<(TransferOverrides, TransferLoadStats)> {
    let display = path.display().to_string();
    let bytes = fs::read(path).map_err(|source| IngestError::InputUnreadable {
        path: display.clone(),
        source,
    })?;
    let text = decode(&bytes, &display)?;
    load_transfer_overrides_from_str(&text, &display)
}

/// Load transfer overrides from already-decoded CSV text.
pub fn load_transfer_overrides_from_str(
    text: &str,
    path: &str,
) -> IngestResult<(TransferOverrides, TransferLoadStats)> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(text.as_bytes());
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let station_col = pick_col(&headers, STATION_SYNONYMS)
        .ok_or_else(|| IngestError::SchemaUndetected { path: path.to_string() })?;
    let seconds_col = pick_col(&headers, SECONDS_SYNONYMS)
        .ok_or_else(|| IngestError::SchemaUndetected { path: path.to_string() })?;
    let from_col = pick_col(&headers, LINE_FROM_SYNONYMS);
    let to_col = pick_col(&headers, LINE_TO_SYNONYMS);

    let mut overrides = TransferOverrides::default();
    let mut stats = TransferLoadStats::default();

    for record in reader.records() {
        let record = record?;
        let Some(station) = record.get(station_col) else { continue };
        if station.is_empty() {
            stats.dropped_rows += 1;
            continue;
        }
        let Some(seconds_cell) = record.get(seconds_col) else {
            stats.dropped_rows += 1;
            continue;
        };
        let Some(seconds) = parse_seconds(seconds_cell) else {
            stats.dropped_rows += 1;
            continue;
        };
        if seconds <= 0 {
            stats.dropped_rows += 1;
            continue;
        }

        let lf = from_col.and_then(|c| record.get(c)).map(str::trim).filter(|s| !s.is_empty());
        let lt = to_col.and_then(|c| record.get(c)).map(str::trim).filter(|s| !s.is_empty());

        match (lf, lt) {
            (Some(lf), Some(lt)) => {
                let lf = normalize_line_label(lf);
                let lt = normalize_line_label(lt);
                if lf == lt {
                    // Same line on both sides carries no transfer meaning; fall
                    // back to treating it as a per-station default.
                    insert_per_station(&mut overrides, &mut stats, station, seconds);
                    continue;
                }
                let key = (station.to_string(), lf, lt);
                if overrides.per_pair.contains_key(&key) {
                    warn!("duplicate transfer override for {:?}, keeping first", key);
                    stats.duplicate_overrides += 1;
                } else {
                    overrides.per_pair.insert(key, seconds);
                    stats.pair_overrides += 1;
                }
            }
            _ => insert_per_station(&mut overrides, &mut stats, station, seconds),
        }
    }

    Ok((overrides, stats))
}

fn insert_per_station(
    overrides: &mut TransferOverrides,
    stats: &mut TransferLoadStats,
    station: &str,
    seconds: i64,
) {
    if overrides.per_station.contains_key(station) {
        warn!("duplicate per-station transfer default for {station}, keeping first");
        stats.duplicate_overrides += 1;
    } else {
        overrides.per_station.insert(station.to_string(), seconds);
        stats.per_station_defaults += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_station_default_when_lines_absent() {
        let csv = "station,seconds\nX,90\n";
        let (overrides, stats) = load_transfer_overrides_from_str(csv, "t.csv").unwrap();
        assert_eq!(overrides.resolve("X", "1호선", "2호선", 180), 90);
        assert_eq!(stats.per_station_defaults, 1);
    }

    #[test]
    fn pair_override_beats_per_station_default() {
        let csv = "station,line_from,line_to,seconds\nX,1호선,2호선,90\nX,,,200\n";
        // second row has no line columns -> per-station default, first is pair override
        let (overrides, _) = load_transfer_overrides_from_str(csv, "t.csv").unwrap();
        assert_eq!(overrides.resolve("X", "1호선", "2호선", 180), 90);
    }

    #[test]
    fn pair_lookup_is_symmetric() {
        let csv = "station,line_from,line_to,seconds\nX,1호선,2호선,120\n";
        let (overrides, _) = load_transfer_overrides_from_str(csv, "t.csv").unwrap();
        assert_eq!(overrides.resolve("X", "1호선", "2호선", 180), 120);
        assert_eq!(overrides.resolve("X", "2호선", "1호선", 180), 120);
    }

    #[test]
    fn fallback_applies_with_no_override() {
        let overrides = TransferOverrides::default();
        assert_eq!(overrides.resolve("X", "1호선", "2호선", 180), 180);
    }

    #[test]
    fn single_line_column_falls_back_to_per_station() {
        let csv = "station,line_from,seconds\nX,1호선,90\n";
        let (overrides, stats) = load_transfer_overrides_from_str(csv, "t.csv").unwrap();
        assert_eq!(overrides.resolve("X", "1호선", "2호선", 180), 90);
        assert_eq!(stats.per_station_defaults, 1);
        assert_eq!(stats.pair_overrides, 0);
    }
}
