//! Base64url and JSON encoding used for token segments.

use std::sync::OnceLock;

use data_encoding::{BASE64URL_NOPAD, Encoding, Specification};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Result, TokenError};

// Standard padded alphabet, tolerant of non-zero trailing bits the way the
// other SDKs' decoders are.
static LENIENT_BASE64: OnceLock<Encoding> = OnceLock::new();

fn lenient_base64() -> &'static Encoding {
    LENIENT_BASE64.get_or_init(|| {
        let mut spec = Specification::new();
        spec.symbols
            .push_str("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/");
        spec.padding = Some('=');
        spec.check_trailing_bits = false;
        spec.encoding().expect("static base64 specification is valid")
    })
}

/// Encode bytes as unpadded base64url.
pub fn base64url_encode(bytes: &[u8]) -> String {
    BASE64URL_NOPAD.encode(bytes)
}

/// Decode base64url, accepting both padded and unpadded input.
///
/// `-` and `_` are mapped back to `+` and `/`, and the `=` padding is
/// restored from the length mod 4 before decoding.
///
/// Non-zero trailing bits are accepted, so only canonical input re-encodes
/// to itself: `"AB"` decodes to `[0]`, which encodes back as `"AA"`.
pub fn base64url_decode(input: &str) -> Result<Vec<u8>> {
    let mut normalized: String = input
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    match normalized.len() % 4 {
        2 => normalized.push_str("=="),
        3 => normalized.push('='),
        _ => {}
    }

    lenient_base64()
        .decode(normalized.as_bytes())
        .map_err(|_| TokenError::InvalidEncoding)
}

/// Render a 16-byte id as lowercase hyphenated hex.
///
/// Every group is big-endian: `01020304-0506-0708-090a-0b0c0d0e0f10`.
pub fn render_canonical_id(id: &[u8; 16]) -> String {
    Uuid::from_bytes(*id).hyphenated().to_string()
}

/// Compact JSON, keys in insertion order.
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}
