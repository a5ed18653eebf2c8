// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::base64;
use super::errors::Error;
use serde_json::{Map, Value};

const SEPARATOR: char = '.';

/// A JSON object decoded from a JWS header or payload segment
pub type JsonMap = Map<String, Value>;

/// A compact JWS split into its three segments and decoded, but NOT verified.
/// Authenticity is established separately, by the signature check.
#[derive(Clone, Debug, PartialEq)]
pub struct Jws {
    /// Decoded JOSE header
    pub header: JsonMap,
    /// Decoded claims-set
    pub payload: JsonMap,
    signature: Vec<u8>,
    // the encoded segments are kept verbatim: the signing input must be the
    // exact bytes the signer saw, not a re-serialisation of the maps
    raw_header: String,
    raw_payload: String,
    raw_signature: String,
}

impl Jws {
    /// Split and decode a compact-serialised JWS
    pub fn decode(compact: &str) -> Result<Jws, Error> {
        let segments: Vec<&str> = compact.split(SEPARATOR).collect();

        let [h, p, s] = segments.as_slice() else {
            return Err(Error::MalformedStructure(format!(
                "expecting 3 segments, got {}",
                segments.len()
            )));
        };

        let header = decode_object(h, "header")?;
        let payload = decode_object(p, "payload")?;
        let signature = base64::decode_url(s)
            .map_err(|e| Error::MalformedStructure(format!("signature: {e:?}")))?;

        Ok(Jws {
            header,
            payload,
            signature,
            raw_header: h.to_string(),
            raw_payload: p.to_string(),
            raw_signature: s.to_string(),
        })
    }

    /// The bytes covered by the signature: `base64url(header) "." base64url(payload)`
    pub fn signing_input(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(self.raw_header.len() + self.raw_payload.len() + 1);
        v.extend_from_slice(self.raw_header.as_bytes());
        v.push(SEPARATOR as u8);
        v.extend_from_slice(self.raw_payload.as_bytes());
        v
    }

    /// The raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The signature segment as it appeared on the wire
    pub fn encoded_signature(&self) -> &str {
        &self.raw_signature
    }
}

fn decode_object(segment: &str, what: &str) -> Result<JsonMap, Error> {
    let bytes = base64::decode_url(segment)
        .map_err(|e| Error::MalformedStructure(format!("{what}: {e:?}")))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(m)) => Ok(m),
        Ok(_) => Err(Error::MalformedStructure(format!(
            "{what}: expecting a JSON object"
        ))),
        Err(e) => Err(Error::MalformedStructure(format!("{what}: {e}"))),
    }
}
