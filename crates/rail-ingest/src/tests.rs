//! Cross-module ingestion scenarios. Per-module unit tests live alongside
//! their implementation in `edges.rs`, `transfers.rs`, `catalog.rs`, and
//! `encoding.rs`.

use crate::{load_ride_edges_from_str, load_transfer_overrides_from_str};

#[test]
fn edges_and_transfers_share_normalized_line_labels() {
    let edges_csv = "line,from_station,to_station,seconds\n01호선,A,B,120\n";
    let (edges, _) = load_ride_edges_from_str(edges_csv, "edges.csv").unwrap();
    assert_eq!(edges[0].line, "1호선");

    let transfer_csv = "station,line_from,line_to,seconds\nX,01호선,2호선,90\n";
    let (overrides, _) = load_transfer_overrides_from_str(transfer_csv, "transfers.csv").unwrap();
    // The normalized "1호선" spelling from edges.rs must match what the
    // transfer loader stored for the same raw "01호선" input.
    assert_eq!(overrides.resolve("X", "1호선", "2호선", 180), 90);
}
