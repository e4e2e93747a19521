//! `rail-graph` — the line-indexed routing graph, state-separated Dijkstra
//! router, and contour banding for the rail routing engine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                            |
//! |------------|-------------------------------------------------------|
//! | [`graph`]  | `RailGraph`, `GraphBuilder`                            |
//! | [`router`] | `Router` trait, `StateSeparatedDijkstra`, `NodeDistances` |
//! | [`contour`]| disjoint time-band partitioning                        |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                         |

pub mod contour;
pub mod error;
pub mod graph;
pub mod router;


pub use contour::{bin as contour_bin, Band, BandDestination};
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, GraphBuilder, RailGraph};
pub use router::{NodeDistances, Router, StateSeparatedDijkstra};

impl RailGraph {
    /// Fastest time from `source_station` to every other station, sorted by
    /// destination name. The public query entry point collaborators and the
    /// CLI call; wraps the node-level two-state Dijkstra plus per-station
    /// aggregation.
    pub fn times_from(&self, source_station: &str, dwell_sec: i64) -> GraphResult<Vec<(String, i64)>> {
        let source = self
            .station_id(source_station)
            .ok_or_else(|| GraphError::StationNotFound(source_station.to_string()))?;
        let sources = self.nodes_of(source);
        if sources.is_empty() {
            return Err(GraphError::StationIsolated(source_station.to_string()));
        }

        let distances = StateSeparatedDijkstra.query(self, sources, dwell_sec, None);

        let mut out = Vec::new();
        for name in self.sorted_station_names() {
            if name == source_station {
                continue;
            }
            let station = self.station_id(name).expect("name came from this graph");
            if let Some(seconds) = distances.station_best(self, station, dwell_sec) {
                out.push((name.to_string(), seconds));
            }
        }
        Ok(out)
    }
}
