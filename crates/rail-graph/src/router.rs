//! State-separated Dijkstra.
//!
//! # Pluggability
//!
//! Callers reach the router through the [`Router`] trait, the same seam the
//! teacher's spatial crate put its `DijkstraRouter` behind, so an alternate
//! algorithm (bidirectional search, contraction) could be swapped in without
//! touching [`crate::graph::RailGraph`] or [`crate::contour`].
//!
//! # Why two distance vectors
//!
//! Per-stop dwell must be charged for every intermediate station a ride
//! passes through, but not for the query's final stop, and not on arrival by
//! transfer. A single distance vector can't express "charge dwell on this
//! arrival, but only if a later hop proves it wasn't the final one" — so the
//! router keeps `dist_T` (best cost arriving by transfer, dwell not yet
//! applied) and `dist_R` (best cost arriving by ride, dwell already applied)
//! separately, and defers the "was this the final stop" decision to
//! aggregation, where it removes one dwell from `dist_R` if a ride's arrival
//! turns out to be the query's answer for that station.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rail_core::{NodeId, StationId};

use crate::graph::RailGraph;

/// Per-node distances from a fixed set of source nodes, in seconds.
/// `i64::MAX` marks an unreached node.
pub struct NodeDistances {
    dist_t: Vec<i64>,
    dist_r: Vec<i64>,
}

const INF: i64 = i64::MAX;

impl NodeDistances {
    /// Aggregate this query's node-level distances to the best time for
    /// `station`, removing exactly one dwell if the best arrival was by ride.
    /// Returns `None` if no node of `station` was reached.
    pub fn station_best(&self, graph: &RailGraph, station: StationId, dwell_sec: i64) -> Option<i64> {
        let mut best = INF;
        for &node in graph.nodes_of(station) {
            let t = self.dist_t[node.index()];
            if t < best {
                best = t;
            }
            let r = self.dist_r[node.index()];
            if r < INF {
                let adjusted = (r - dwell_sec).max(0);
                if adjusted < best {
                    best = adjusted;
                }
            }
        }
        (best < INF).then_some(best)
    }
}

/// Pluggable routing engine over a built [`RailGraph`].
pub trait Router: Send + Sync {
    /// Compute distances from every node in `sources` simultaneously (a
    /// multi-source query — one node per line at the origin station).
    /// `cutoff`, if given, prunes relaxations past that distance.
    fn query(&self, graph: &RailGraph, sources: &[NodeId], dwell_sec: i64, cutoff: Option<i64>) -> NodeDistances;
}

/// The state-separated Dijkstra described in this module's doc comment.
pub struct StateSeparatedDijkstra;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Transfer = 0,
    Ride = 1,
}

impl Router for StateSeparatedDijkstra {
    fn query(&self, graph: &RailGraph, sources: &[NodeId], dwell_sec: i64, cutoff: Option<i64>) -> NodeDistances {
        let n = graph.node_count();
        let mut dist_t = vec![INF; n];
        let mut dist_r = vec![INF; n];

        let mut heap: BinaryHeap<Reverse<(i64, u8, u32)>> = BinaryHeap::new();
        for &source in sources {
            if dist_t[source.index()] != 0 {
                dist_t[source.index()] = 0;
                heap.push(Reverse((0, Mode::Transfer as u8, source.index() as u32)));
            }
        }

        while let Some(Reverse((cost, mode_code, node_idx))) = heap.pop() {
            let node = NodeId(node_idx);
            let mode = if mode_code == Mode::Transfer as u8 { Mode::Transfer } else { Mode::Ride };
            let current = match mode {
                Mode::Transfer => dist_t[node.index()],
                Mode::Ride => dist_r[node.index()],
            };
            if cost > current {
                continue;
            }
            if let Some(cutoff) = cutoff {
                if cost > cutoff {
                    continue;
                }
            }

            for &(neighbor, weight, is_transfer) in graph.neighbors(node) {
                if is_transfer {
                    let candidate = cost + weight;
                    if candidate < dist_t[neighbor.index()] {
                        dist_t[neighbor.index()] = candidate;
                        heap.push(Reverse((candidate, Mode::Transfer as u8, neighbor.index() as u32)));
                    }
                } else {
                    let candidate = cost + weight + dwell_sec;
                    if candidate < dist_r[neighbor.index()] {
                        dist_r[neighbor.index()] = candidate;
                        heap.push(Reverse((candidate, Mode::Ride as u8, neighbor.index() as u32)));
                    }
                }
            }
        }

        NodeDistances { dist_t, dist_r }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use rail_ingest::{RideEdge, TransferOverrides};

    fn edge(line: &str, a: &str, b: &str, seconds: i64) -> RideEdge {
        RideEdge { line: line.to_string(), a: a.to_string(), b: b.to_string(), seconds }
    }

    #[test]
    fn two_station_ride_no_dwell_on_final_stop() {
        let mut builder = GraphBuilder::new();
        builder.add_ride_edges(&[edge("1호선", "A", "B", 120)]);
        let graph = builder.build(&TransferOverrides::default(), 180);

        let a = graph.station_id("A").unwrap();
        let b = graph.station_id("B").unwrap();
        let dist = StateSeparatedDijkstra.query(&graph, graph.nodes_of(a), 40, None);
        assert_eq!(dist.station_best(&graph, b, 40), Some(120));
    }

    #[test]
    fn three_station_ride_charges_one_intermediate_dwell() {
        let mut builder = GraphBuilder::new();
        builder.add_ride_edges(&[edge("1호선", "A", "B", 120), edge("1호선", "B", "C", 120)]);
        let graph = builder.build(&TransferOverrides::default(), 180);

        let a = graph.station_id("A").unwrap();
        let c = graph.station_id("C").unwrap();
        let dist = StateSeparatedDijkstra.query(&graph, graph.nodes_of(a), 40, None);
        assert_eq!(dist.station_best(&graph, c, 40), Some(280)); // 120+40+120
    }

    #[test]
    fn transfer_scenario_matches_worked_example() {
        // L1:A-X 60s, L2:X-B 60s, per-station transfer 90s at X, dwell 40s.
        let mut builder = GraphBuilder::new();
        builder.add_ride_edges(&[edge("1호선", "A", "X", 60), edge("2호선", "X", "B", 60)]);
        let csv = "station,seconds\nX,90\n";
        let (overrides, _) = rail_ingest::load_transfer_overrides_from_str(csv, "t.csv").unwrap();
        let graph = builder.build(&overrides, 180);

        let a = graph.station_id("A").unwrap();
        let b = graph.station_id("B").unwrap();
        let x = graph.station_id("X").unwrap();

        let dist = StateSeparatedDijkstra.query(&graph, graph.nodes_of(a), 40, None);
        assert_eq!(dist.station_best(&graph, b, 40), Some(250)); // 60+40+90+60
        assert_eq!(dist.station_best(&graph, x, 40), Some(60)); // final stop: no dwell charged
    }
}
