//! Line-indexed routing graph: nodes are `(station, line)` pairs.
//!
//! # Node allocation
//!
//! [`GraphBuilder::get_node_id`] interns `(station, line)` pairs into a
//! stable `NodeId`, the same intern-and-return-an-id shape the reference
//! ingestion scripts' `get_id` closure uses, generalized from a single
//! station/node key to the two-part `(station, line)` key this graph needs.
//!
//! # Edge storage
//!
//! Each node keeps a flat `Vec<(NodeId, seconds, is_transfer)>` of its
//! undirected neighbors. This crate favors adjacency lists over the
//! teacher's CSR layout because the graph here is built once from a modest
//! number of stations and never needs CSR's cache-friendly bulk scan over
//! millions of edges — `Vec`-per-node is simpler and the access pattern
//! (per-query Dijkstra, not per-tick simulation) does not reward the extra
//! construction complexity.

use std::collections::{HashMap, HashSet};

use log::{info, warn};

use rail_core::{LineId, NodeId, StationId};
use rail_ingest::{RideEdge, TransferOverrides};

/// A single undirected adjacency entry: neighbor, weight in seconds, and
/// whether traversing it is a transfer (`true`) or a ride (`false`).
pub type Edge = (NodeId, i64, bool);

/// Line-indexed routing graph. Immutable once built; [`crate::router`]
/// borrows it read-only per query.
pub struct RailGraph {
    station_names: Vec<String>,
    station_index: HashMap<String, StationId>,
    line_labels: Vec<String>,
    node_station: Vec<StationId>,
    node_line: Vec<LineId>,
    station_nodes: Vec<Vec<NodeId>>,
    adjacency: Vec<Vec<Edge>>,
}

impl RailGraph {
    pub fn station_count(&self) -> usize {
        self.station_names.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_station.len()
    }

    pub fn station_name(&self, id: StationId) -> &str {
        &self.station_names[id.index()]
    }

    pub fn line_label(&self, id: LineId) -> &str {
        &self.line_labels[id.index()]
    }

    pub fn station_id(&self, name: &str) -> Option<StationId> {
        self.station_index.get(name).copied()
    }

    /// All station names in sorted order — the deterministic iteration order
    /// the exporter requires.
    pub fn sorted_station_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.station_names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn nodes_of(&self, station: StationId) -> &[NodeId] {
        &self.station_nodes[station.index()]
    }

    pub fn node_station(&self, node: NodeId) -> StationId {
        self.node_station[node.index()]
    }

    pub fn node_line(&self, node: NodeId) -> LineId {
        self.node_line[node.index()]
    }

    pub fn neighbors(&self, node: NodeId) -> &[Edge] {
        &self.adjacency[node.index()]
    }
}

/// Incrementally builds a [`RailGraph`] from ride edges and transfer
/// overrides.
pub struct GraphBuilder {
    station_index: HashMap<String, StationId>,
    station_names: Vec<String>,
    line_index: HashMap<String, LineId>,
    line_labels: Vec<String>,
    node_index: HashMap<(StationId, LineId), NodeId>,
    node_station: Vec<StationId>,
    node_line: Vec<LineId>,
    adjacency: Vec<Vec<Edge>>,
    station_lines: HashMap<StationId, HashSet<LineId>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            station_index: HashMap::new(),
            station_names: Vec::new(),
            line_index: HashMap::new(),
            line_labels: Vec::new(),
            node_index: HashMap::new(),
            node_station: Vec::new(),
            node_line: Vec::new(),
            adjacency: Vec::new(),
            station_lines: HashMap::new(),
        }
    }

    fn get_station_id(&mut self, name: &str) -> StationId {
        if let Some(&id) = self.station_index.get(name) {
            return id;
        }
        let id = StationId(self.station_names.len() as u32);
        self.station_names.push(name.to_string());
        self.station_index.insert(name.to_string(), id);
        id
    }

    fn get_line_id(&mut self, label: &str) -> LineId {
        if let Some(&id) = self.line_index.get(label) {
            return id;
        }
        let id = LineId(self.line_labels.len() as u32);
        self.line_labels.push(label.to_string());
        self.line_index.insert(label.to_string(), id);
        id
    }

    fn get_node_id(&mut self, station: StationId, line: LineId) -> NodeId {
        if let Some(&id) = self.node_index.get(&(station, line)) {
            return id;
        }
        let id = NodeId(self.node_station.len() as u32);
        self.node_station.push(station);
        self.node_line.push(line);
        self.adjacency.push(Vec::new());
        self.node_index.insert((station, line), id);
        id
    }

    /// Install undirected ride edges for every `RideEdge`, interning the
    /// `(station, line)` nodes involved as a side effect.
    pub fn add_ride_edges(&mut self, edges: &[RideEdge]) -> &mut Self {
        for edge in edges {
            let line = self.get_line_id(&edge.line);
            let sa = self.get_station_id(&edge.a);
            let sb = self.get_station_id(&edge.b);
            let na = self.get_node_id(sa, line);
            let nb = self.get_node_id(sb, line);

            self.adjacency[na.index()].push((nb, edge.seconds, false));
            self.adjacency[nb.index()].push((na, edge.seconds, false));

            self.station_lines.entry(sa).or_default().insert(line);
            self.station_lines.entry(sb).or_default().insert(line);
        }
        info!("loaded {} ride edges across {} stations", edges.len(), self.station_names.len());
        self
    }

    /// Consume the builder, installing transfer edges for every station
    /// served by ≥2 lines, then return the built [`RailGraph`].
    pub fn build(mut self, overrides: &TransferOverrides, default_transfer_sec: i64) -> RailGraph {
        let mut transfer_count = 0usize;

        let stations: Vec<StationId> = self.station_lines.keys().copied().collect();
        for station in stations {
            let mut lines: Vec<LineId> = self.station_lines[&station].iter().copied().collect();
            if lines.len() < 2 {
                continue;
            }
            lines.sort_unstable();

            let station_name = self.station_names[station.index()].clone();
            for i in 0..lines.len() {
                for j in (i + 1)..lines.len() {
                    let lf = lines[i];
                    let lt = lines[j];
                    let lf_label = self.line_labels[lf.index()].clone();
                    let lt_label = self.line_labels[lt.index()].clone();
                    let weight = overrides.resolve(&station_name, &lf_label, &lt_label, default_transfer_sec);

                    let na = self.get_node_id(station, lf);
                    let nb = self.get_node_id(station, lt);
                    self.adjacency[na.index()].push((nb, weight, true));
                    self.adjacency[nb.index()].push((na, weight, true));
                    transfer_count += 1;
                }
            }
        }

        if transfer_count == 0 {
            warn!("no transfer edges installed — every station is served by a single line");
        } else {
            info!("installed {transfer_count} transfer edges");
        }

        let mut station_nodes: Vec<Vec<NodeId>> = vec![Vec::new(); self.station_names.len()];
        for (idx, &station) in self.node_station.iter().enumerate() {
            station_nodes[station.index()].push(NodeId(idx as u32));
        }

        RailGraph {
            station_names: self.station_names,
            station_index: self.station_index,
            line_labels: self.line_labels,
            node_station: self.node_station,
            node_line: self.node_line,
            station_nodes,
            adjacency: self.adjacency,
        }
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(line: &str, a: &str, b: &str, seconds: i64) -> RideEdge {
        RideEdge { line: line.to_string(), a: a.to_string(), b: b.to_string(), seconds }
    }

    #[test]
    fn single_line_station_has_no_transfer_edges() {
        let mut builder = GraphBuilder::new();
        builder.add_ride_edges(&[edge("1호선", "A", "B", 120)]);
        let graph = builder.build(&TransferOverrides::default(), 180);

        let a = graph.station_id("A").unwrap();
        let node = graph.nodes_of(a)[0];
        assert!(graph.neighbors(node).iter().all(|(_, _, is_transfer)| !is_transfer));
    }

    #[test]
    fn shared_station_gets_transfer_edge() {
        let mut builder = GraphBuilder::new();
        builder.add_ride_edges(&[edge("1호선", "A", "X", 60), edge("2호선", "X", "B", 60)]);
        let graph = builder.build(&TransferOverrides::default(), 180);

        let x = graph.station_id("X").unwrap();
        assert_eq!(graph.nodes_of(x).len(), 2);
        let transfer_edges: usize = graph
            .nodes_of(x)
            .iter()
            .flat_map(|&n| graph.neighbors(n))
            .filter(|(_, _, is_transfer)| *is_transfer)
            .count();
        assert_eq!(transfer_edges, 2); // one entry per endpoint of the single transfer edge
    }

    #[test]
    fn transfer_weight_uses_resolve_precedence() {
        let mut overrides = TransferOverrides::default();
        let csv = "station,line_from,line_to,seconds\nX,1호선,2호선,120\n";
        let (overrides_loaded, _) =
            rail_ingest::load_transfer_overrides_from_str(csv, "t.csv").unwrap();
        overrides = overrides_loaded;

        let mut builder = GraphBuilder::new();
        builder.add_ride_edges(&[edge("1호선", "A", "X", 60), edge("2호선", "X", "B", 60)]);
        let graph = builder.build(&overrides, 180);

        let x = graph.station_id("X").unwrap();
        let weight = graph
            .nodes_of(x)
            .iter()
            .flat_map(|&n| graph.neighbors(n))
            .find(|(_, _, is_transfer)| *is_transfer)
            .map(|(_, w, _)| *w)
            .unwrap();
        assert_eq!(weight, 120);
    }
}
