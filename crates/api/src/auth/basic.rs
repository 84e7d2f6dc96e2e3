//! `Authorization: Basic` credential parsing.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Username and password decoded from a Basic authorization header.
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Decode the value of an `Authorization` header of the form `Basic <b64>`.
///
/// Returns `None` for any other scheme, invalid base64, non-UTF-8 payloads or
/// a payload without the `:` separator. The scheme name is case-insensitive.
pub fn parse_basic_header(header: &str) -> Option<BasicCredentials> {
    let (scheme, encoded) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
