//! Encoding-detection cascade for upstream CSV exports.
//!
//! Transit-authority exports show up in at least four encodings in practice:
//! UTF-8 with a byte-order mark, plain UTF-8, and the legacy Korean codepages
//! `EUC-KR`/`CP949`. [`decode`] tries each in turn and returns the first clean
//! decode.

use crate::error::IngestError;

const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode `bytes` read from `path` (used only for error messages), trying
/// UTF-8-with-BOM, UTF-8, then the legacy Korean codepage, in that order.
///
/// `encoding_rs`'s `EUC_KR` decoder implements the WHATWG "EUC-KR" label,
/// which is defined as a superset covering `CP949`/UHC as well — so a single
/// pass through it stands in for what upstream scripts treat as two separate
/// `EUC-KR` and `CP949` attempts.
pub fn decode(bytes: &[u8], path: &str) -> Result<String, IngestError> {
    let body = bytes.strip_prefix(BOM).unwrap_or(bytes);

    if let Ok(s) = std::str::from_utf8(body) {
        return Ok(s.to_string());
    }

    let (cow, _encoding, had_errors) = encoding_rs::EUC_KR.decode(body);
    if !had_errors {
        return Ok(cow.into_owned());
    }

    Err(IngestError::EncodingUndetected {
        path: path.to_string(),
    })
}
