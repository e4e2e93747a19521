//! `rail-ingest` — CSV schema detection, encoding recovery, and station
//! coordinate loading for the rail routing engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|--------------------------------------------------------|
//! | [`encoding`]  | UTF-8/EUC-KR decode cascade                            |
//! | [`columns`]   | case-insensitive header synonym matching               |
//! | [`edges`]     | `RideEdge`, edge-schema and sequential-schema loaders   |
//! | [`transfers`] | `TransferOverrides`, transfer-penalty loader            |
//! | [`catalog`]   | `StationCatalog` (R-tree indexed station coordinates)   |
//! | [`error`]     | `IngestError`, `IngestResult<T>`                        |

mod columns;

pub mod catalog;
pub mod edges;
pub mod encoding;
pub mod error;
pub mod transfers;

#[cfg(test)]
mod tests;

pub use catalog::{StationCatalog, StationCoord};
pub use edges::{load_ride_edges, load_ride_edges_from_str, EdgeLoadStats, RideEdge};
pub use error::{IngestError, IngestResult};
pub use transfers::{
    load_transfer_overrides, load_transfer_overrides_from_str, TransferLoadStats,
    TransferOverrides,
};
