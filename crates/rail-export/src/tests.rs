//! Cross-module export scenarios. Per-module unit tests live alongside their
//! implementation in `csv.rs` and `contour.rs`.

use crate::{write_all_pairs, TravelTimeRow};

#[test]
fn single_source_subset_matches_full_matrix_row() {
    let dir = tempfile::tempdir().unwrap();
    let all_path = dir.path().join("all.csv");
    let rows = vec![
        TravelTimeRow { src_station: "A".into(), dst_station: "B".into(), seconds: 120 },
        TravelTimeRow { src_station: "A".into(), dst_station: "C".into(), seconds: 280 },
    ];
    write_all_pairs(&all_path, &rows).unwrap();

    let single_path = dir.path().join("single.csv");
    let times = vec![("B".to_string(), 120), ("C".to_string(), 280)];
    crate::write_single_source(&single_path, "A", &times).unwrap();

    let all_contents = std::fs::read_to_string(&all_path).unwrap();
    let single_contents = std::fs::read_to_string(&single_path).unwrap();
    // Both files carry the same data rows for source A (header aside).
    let all_rows: Vec<&str> = all_contents.lines().skip(1).collect();
    let single_rows: Vec<&str> = single_contents.lines().skip(1).collect();
    assert_eq!(all_rows, single_rows);
}
