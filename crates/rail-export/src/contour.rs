//! Contour JSON sink.
//!
//! Serializes [`rail_graph::Band`]s into the `contour-data` bridge contract's
//! shape — one object per band with its center and destinations — without
//! implementing the HTTP surface that contract belongs to.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use rail_graph::Band;

use crate::error::ExportResult;

#[derive(Debug, Serialize)]
struct ContourCenterDto {
    name: String,
    lat: f32,
    lng: f32,
}

#[derive(Debug, Serialize)]
struct ContourDestinationDto {
    name: String,
    lat: f32,
    lng: f32,
    seconds: i64,
    minutes: i64,
}

#[derive(Debug, Serialize)]
struct ContourBandDto {
    threshold_min: i64,
    center: ContourCenterDto,
    destinations: Vec<ContourDestinationDto>,
}

/// Write `bands` as a JSON array to `path`.
pub fn write_contour_json(path: &Path, bands: &[Band]) -> ExportResult<()> {
    let dtos: Vec<ContourBandDto> = bands
        .iter()
        .map(|band| ContourBandDto {
            threshold_min: band.threshold_min,
            center: ContourCenterDto {
                name: band.center_name.clone(),
                lat: band.center.lat,
                lng: band.center.lng,
            },
            destinations: band
                .destinations
                .iter()
                .map(|d| ContourDestinationDto {
                    name: d.name.clone(),
                    lat: d.point.lat,
                    lng: d.point.lng,
                    seconds: d.seconds,
                    minutes: d.seconds / 60,
                })
                .collect(),
        })
        .collect();

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &dtos)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rail_core::GeoPoint;
    use rail_graph::BandDestination;

    #[test]
    fn writes_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contour.json");

        let bands = vec![Band {
            threshold_min: 10,
            center_name: "X".to_string(),
            center: GeoPoint::new(37.5, 127.0),
            destinations: vec![BandDestination {
                name: "Y".to_string(),
                point: GeoPoint::new(37.6, 127.1),
                seconds: 300,
            }],
        }];

        write_contour_json(&path, &bands).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed[0]["threshold_min"], 10);
        assert_eq!(parsed[0]["destinations"][0]["minutes"], 5);
    }
}
