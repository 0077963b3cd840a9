//! URL handling helpers.
//!
//! # Example
//!
//! ```
//! use rwf_markup::http::{urlencode, urldecode};
//!
//! let url = "?foo=bar&hello=world%20";
//!
//! let decoded = urldecode(url);
//! let encoded = urlencode(&decoded);
//!
//! assert_eq!(decoded, "?foo=bar&hello=world ");
//! assert_eq!(encoded, "%3Ffoo%3Dbar%26hello%3Dworld%20");
//! ```

/// Decode a string encoded with percent-encoding, also known as URL encoding.
///
/// Invalid escapes are kept as-is. `+` is decoded as a space.
pub fn urldecode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());

                match hex {
                    Some(byte) => {
                        result.push(byte);
                        i += 3;
                    }
                    None => {
                        result.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                result.push(b' ');
                i += 1;
            }
            b => {
                result.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&result).to_string()
}

/// Encode a string using percent-encoding, also known as URL encoding.
pub fn urlencode(s: &str) -> String {
    let mut result = String::new();

    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char)
            }
            b => result.push_str(&format!("%{:02X}", b)),
        }
    }

    result
}
