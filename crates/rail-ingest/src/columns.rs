//! Case-insensitive header synonym matching shared by the edge and transfer
//! loaders, in the spirit of the reference ingestion scripts' `pick_col`
//! helper (lower-cased header names matched against a candidate list).

/// Return the index of the first header in `headers` matching any of
/// `candidates`, case-insensitively.
pub fn pick_col(headers: &[String], candidates: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let lower = h.trim().to_lowercase();
        candidates.iter().any(|c| lower == c.to_lowercase())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        let headers = vec!["Line".to_string(), "From_Station".to_string()];
        assert_eq!(pick_col(&headers, &["line", "호선"]), Some(0));
        assert_eq!(pick_col(&headers, &["from_station", "출발역"]), Some(1));
    }

    #[test]
    fn no_match_is_none() {
        let headers = vec!["foo".to_string()];
        assert_eq!(pick_col(&headers, &["line"]), None);
    }
}
