//! Contour banding: partition reachable destinations into disjoint time
//! bands for a visualization layer.
//!
//! Grounded on the `rstar`-backed station-catalog pattern the ambient stack
//! adopts throughout this workspace (`crate::graph` nodes snap onto
//! `rail-ingest::StationCatalog` the same way the teacher's `RoadNetwork`
//! snaps geographic points onto road nodes); the disjoint-banding algorithm
//! itself has no upstream precedent — the original contour endpoint draws a
//! continuous `matplotlib` heatmap, not discrete bands.

use rail_core::{CoordinateLookup, GeoPoint};

/// One reachable destination inside a [`Band`].
#[derive(Debug, Clone, PartialEq)]
pub struct BandDestination {
    pub name: String,
    pub point: GeoPoint,
    pub seconds: i64,
}

/// A contiguous time band and the destinations whose smallest-fitting band
/// this is.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub threshold_min: i64,
    pub center_name: String,
    pub center: GeoPoint,
    pub destinations: Vec<BandDestination>,
}

/// Partition `times` (station name, seconds) pairs into disjoint bands by
/// `thresholds_min` (ascending minutes). A destination lands in the smallest
/// band whose threshold it satisfies and is never repeated in a larger one.
/// The source station itself is placed in the innermost band at time 0.
pub fn bin(
    source_name: &str,
    thresholds_min: &[i64],
    times: &[(String, i64)],
    coords: &dyn CoordinateLookup,
) -> Vec<Band> {
    let source_point = coords.lookup(source_name).unwrap_or(GeoPoint::new(0.0, 0.0));

    let mut bands: Vec<Band> = thresholds_min
        .iter()
        .map(|&t| Band {
            threshold_min: t,
            center_name: source_name.to_string(),
            center: source_point,
            destinations: Vec::new(),
        })
        .collect();

    if let Some(first) = bands.first_mut() {
        first.destinations.push(BandDestination {
            name: source_name.to_string(),
            point: source_point,
            seconds: 0,
        });
    }

    for (name, seconds) in times {
        if name == source_name {
            continue;
        }
        let minutes = seconds / 60;
        if let Some(band) = bands.iter_mut().find(|b| minutes <= b.threshold_min) {
            band.destinations.push(BandDestination {
                name: name.clone(),
                point: coords.lookup(name).unwrap_or(GeoPoint::new(0.0, 0.0)),
                seconds: *seconds,
            });
        }
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCoords;
    impl CoordinateLookup for FixedCoords {
        fn lookup(&self, _: &str) -> Option<GeoPoint> {
            Some(GeoPoint::new(0.0, 0.0))
        }
    }

    #[test]
    fn destinations_land_in_smallest_fitting_band() {
        let times = vec![("A".to_string(), 300), ("B".to_string(), 900), ("C".to_string(), 1900)];
        let bands = bin("X", &[10, 20, 30], &times, &FixedCoords);

        assert_eq!(bands[0].destinations.iter().filter(|d| d.name != "X").count(), 1); // A
        assert_eq!(bands[1].destinations.len(), 1); // B
        assert_eq!(bands[2].destinations.len(), 1); // C
    }

    #[test]
    fn source_station_is_in_innermost_band_at_zero() {
        let bands = bin("X", &[10, 20], &[], &FixedCoords);
        assert_eq!(bands[0].destinations[0].name, "X");
        assert_eq!(bands[0].destinations[0].seconds, 0);
    }

    #[test]
    fn destination_past_all_thresholds_is_dropped() {
        let times = vec![("Far".to_string(), 10_000)];
        let bands = bin("X", &[10, 20], &times, &FixedCoords);
        assert!(bands.iter().all(|b| b.destinations.iter().all(|d| d.name != "Far")));
    }

    #[test]
    fn destination_appears_in_exactly_one_band() {
        let times = vec![("A".to_string(), 300)];
        let bands = bin("X", &[10, 20, 30], &times, &FixedCoords);
        let count: usize = bands.iter().map(|b| b.destinations.iter().filter(|d| d.name == "A").count()).sum();
        assert_eq!(count, 1);
    }
}
