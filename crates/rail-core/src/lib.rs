//! `rail-core` — foundational types for the rail routing engine.
//!
//! This crate is a dependency of every other crate in the workspace. It
//! intentionally has no workspace-local dependencies and minimal external
//! ones (only an optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                      |
//! |------------|------------------------------------------------|
//! | [`ids`]    | `StationId`, `LineId`, `NodeId`                |
//! | [`geo`]    | `GeoPoint`, haversine distance                 |
//! | [`time`]   | `parse_seconds`, `format_mmss`                 |
//! | [`labels`] | line-label canonicalization                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.    |
//!           | Required by `rail-export`'s contour JSON sink.         |

pub mod geo;
pub mod ids;
pub mod labels;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::{CoordinateLookup, GeoPoint};
pub use ids::{LineId, NodeId, StationId};
pub use labels::normalize as normalize_line_label;
pub use time::{format_mmss, parse_seconds};
