// SPDX-License-Identifier: Apache-2.0

use base64::{self, engine::general_purpose, Engine as _};

use super::errors::Error;

/// decodes bytes from an unpadded base64url-encoded string (a JWS segment)
pub fn decode_url(v: &str) -> Result<Vec<u8>, Error> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(v)
        .map_err(|e| Error::MalformedStructure(e.to_string()))
}

/// encodes bytes as unpadded base64url (a JWS segment)
#[cfg(test)]
pub fn encode_url(v: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(v)
}

/// decodes bytes from a standard (padded) base64-encoded string, as used by
/// the x5c header and the nonce claim
pub fn decode_std(v: &str) -> Result<Vec<u8>, Error> {
    general_purpose::STANDARD
        .decode(v)
        .map_err(|e| Error::MalformedStructure(e.to_string()))
}

#[cfg(test)]
pub fn encode_std(v: &[u8]) -> String {
    general_purpose::STANDARD.encode(v)
}
