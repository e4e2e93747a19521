//! Plain data row type written by the CSV backend.

/// One `(src, dst)` travel time, ready for CSV serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelTimeRow {
    pub src_station: String,
    pub dst_station: String,
    pub seconds: i64,
}

impl TravelTimeRow {
    /// Truncating minutes, matching the upstream convention — never round up.
    pub fn minutes(&self) -> i64 {
        self.seconds / 60
    }
}
