//! Cell-level time parsing.
//!
//! Upstream timetable exports mix three cell shapes for a duration: `"MM:SS"`,
//! a bare integer number of seconds, and a decimal string. [`parse_seconds`] is
//! the single place that interprets any of them; callers must never re-implement
//! this logic (a bare numeric is *always* seconds, never minutes).

/// Parse a CSV cell into a whole number of seconds.
///
/// - `"01:30"` (`^\d+:\d{2}$`) → `60*M + S`.
/// - Any other non-empty parseable real number → rounded to the nearest integer
///   and returned *as seconds*, never multiplied by 60.
/// - Empty (after trimming) or unparseable → `None` ("Missing").
///
/// Thousands separators (`,`) are stripped before parsing so `"1,500"` reads as
/// `1500`.
pub fn parse_seconds(cell: &str) -> Option<i64> {
    let cleaned = cell.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    if let Some((m, s)) = split_mmss(&cleaned) {
        return Some(m * 60 + s);
    }

    cleaned.parse::<f64>().ok().map(|f| f.round() as i64)
}

/// Match `^(\d+):(\d{2})$` and return `(minutes, seconds)` on success.
fn split_mmss(s: &str) -> Option<(i64, i64)> {
    let (min_part, sec_part) = s.split_once(':')?;
    if min_part.is_empty() || !min_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if sec_part.len() != 2 || !sec_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let m: i64 = min_part.parse().ok()?;
    let s: i64 = sec_part.parse().ok()?;
    Some((m, s))
}

/// Format a whole number of seconds as `MM:SS`, zero-padded, with no upper
/// bound on the minutes component.
///
/// Exists to exercise the time-parse idempotence property; not otherwise
/// load-bearing.
pub fn format_mmss(seconds: i64) -> String {
    let m = seconds / 60;
    let s = seconds % 60;
    format!("{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mmss_parses() {
        assert_eq!(parse_seconds("01:30"), Some(90));
        assert_eq!(parse_seconds(" 12:05 "), Some(725));
    }

    #[test]
    fn bare_numeric_is_seconds_not_minutes() {
        assert_eq!(parse_seconds("90"), Some(90));
        assert_eq!(parse_seconds("90.4"), Some(90));
    }

    #[test]
    fn thousands_separator_is_stripped() {
        assert_eq!(parse_seconds("1,500"), Some(1500));
    }

    #[test]
    fn empty_is_missing() {
        assert_eq!(parse_seconds(""), None);
        assert_eq!(parse_seconds("   "), None);
    }

    #[test]
    fn garbage_is_missing() {
        assert_eq!(parse_seconds("abc"), None);
        assert_eq!(parse_seconds("1:2:3"), None);
    }

    #[test]
    fn mmss_requires_two_digit_seconds() {
        assert_eq!(parse_seconds("1:5"), None);
    }

    #[test]
    fn format_mmss_roundtrips() {
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(725), "12:05");
    }

    #[test]
    fn idempotence_over_parseable_inputs() {
        for input in ["01:30", "90", "1,500", "725"] {
            let once = parse_seconds(input).unwrap();
            let twice = parse_seconds(&format_mmss(once)).unwrap();
            assert_eq!(once, twice, "input={input}");
        }
    }
}
