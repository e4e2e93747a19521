//! Station coordinate catalog, R-tree indexed for nearest-station lookups.
//!
//! Mirrors the `NodeEntry`/`RTreeObject`/`PointDistance`/`RTree::bulk_load`
//! shape the teacher's spatial network uses to snap geographic points onto
//! graph entities, generalized here from road nodes to named stations.

use std::fs;
use std::path::Path;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::Deserialize;

use rail_core::{CoordinateLookup, GeoPoint};

use crate::error::{IngestError, IngestResult};

/// One row of the station-coordinates JSON catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct StationCoord {
    pub name: String,
    pub lat: f32,
    pub lng: f32,
}

impl StationCoord {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy)]
struct StationEntry {
    point: [f32; 2],
    idx: u32,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Name-indexed and spatially-indexed station coordinates.
pub struct StationCatalog {
    stations: Vec<StationCoord>,
    by_name: std::collections::HashMap<String, usize>,
    index: RTree<StationEntry>,
}

impl StationCatalog {
    pub fn from_records(stations: Vec<StationCoord>) -> Self {
        let by_name = stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();

        let entries: Vec<StationEntry> = stations
            .iter()
            .enumerate()
            .map(|(i, s)| StationEntry { point: [s.lat, s.lng], idx: i as u32 })
            .collect();

        Self { stations, by_name, index: RTree::bulk_load(entries) }
    }

    /// Load a JSON array of `{name, lat, lng}` objects from `path`.
    pub fn load(path: &Path) -> IngestResult<Self> {
        let display = path.display().to_string();
        let bytes = fs::read(path).map_err(|source| IngestError::InputUnreadable {
            path: display.clone(),
            source,
        })?;
        let stations: Vec<StationCoord> = serde_json::from_slice(&bytes)?;
        Ok(Self::from_records(stations))
    }

    /// Exact coordinate lookup by station name.
    pub fn get(&self, name: &str) -> Option<&StationCoord> {
        self.by_name.get(name).map(|&i| &self.stations[i])
    }

    /// Nearest station to an arbitrary point — the lookup half of the
    /// `nearest-station` bridge contract.
    pub fn nearest(&self, lat: f32, lng: f32) -> Option<&StationCoord> {
        self.index
            .nearest_neighbor(&[lat, lng])
            .map(|entry| &self.stations[entry.idx as usize])
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl CoordinateLookup for StationCatalog {
    fn lookup(&self, station_name: &str) -> Option<GeoPoint> {
        self.get(station_name).map(StationCoord::point)
    }
}
