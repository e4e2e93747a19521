//! `rail-export` — deterministic CSV and contour-JSON output for the rail
//! routing engine.
//!
//! # Crate layout
//!
//! | Module     | Contents                                           |
//! |------------|-------------------------------------------------------|
//! | [`row`]    | `TravelTimeRow`                                        |
//! | [`csv`]    | `CsvExporter`, `write_all_pairs`, `write_single_source` |
//! | [`contour`]| `write_contour_json`                                    |
//! | [`error`]  | `ExportError`, `ExportResult<T>`                       |

pub mod contour;
pub mod csv;
pub mod error;
pub mod row;

#[cfg(test)]
mod tests;

pub use contour::write_contour_json;
pub use csv::{write_all_pairs, write_single_source, CsvExporter};
pub use error::{ExportError, ExportResult};
pub use row::TravelTimeRow;
