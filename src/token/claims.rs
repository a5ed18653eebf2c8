// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::common::*;
use super::errors::Error;
use super::jws::JsonMap;
use openssl::nid::Nid;
use openssl::x509::X509Ref;
use serde_json::Value;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// The subject CN the SafetyNet service's signing certificate is issued to
pub const EXPECTED_HOSTNAME: &str = "attest.android.com";

const NONCE: &str = "nonce";
const TIMESTAMP_MS: &str = "timestampMs";
const CTS_PROFILE_MATCH: &str = "ctsProfileMatch";
const BASIC_INTEGRITY: &str = "basicIntegrity";
const APK_PACKAGE_NAME: &str = "apkPackageName";
const APK_CERTIFICATE_DIGEST_SHA256: &str = "apkCertificateDigestSha256";
const APK_DIGEST_SHA256: &str = "apkDigestSha256";
const EVALUATION_TYPE: &str = "evaluationType";
const ADVICE: &str = "advice";
const ERROR: &str = "error";

/// The SafetyNet attestation claims-set
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Claims {
    /// The challenge supplied by the relying party, echoed back
    pub nonce: Vec<u8>,
    /// Milliseconds since the epoch when the response was generated
    pub timestamp_ms: u64,
    /// Whether the device passed the compatibility (CTS) profile check.  This
    /// is the integrity verdict relying parties usually gate on.
    pub cts_profile_match: bool,
    /// The weaker "has not been tampered with" verdict
    pub basic_integrity: Option<bool>,
    pub apk_package_name: Option<String>,
    pub apk_certificate_digest_sha256: Vec<Vec<u8>>,
    pub apk_digest_sha256: Option<Vec<u8>>,
    /// Comma separated list of the evaluation types used, e.g. "BASIC,HARDWARE_BACKED"
    pub evaluation_type: Option<String>,
    /// Hint on how to bring the device back into a passing state
    pub advice: Option<String>,
    /// Set by the service when it could not evaluate the device
    pub error: Option<String>,
}

impl Claims {
    /// Extract the claims from a decoded JWS payload.  Unknown claims are
    /// ignored.
    pub fn decode(payload: &JsonMap) -> Result<Claims, Error> {
        let mut c: Claims = Default::default();

        // mandatory claims
        c.nonce = to_bstr(mandatory(payload, NONCE)?, NONCE)?;
        c.timestamp_ms = to_uint(mandatory(payload, TIMESTAMP_MS)?, TIMESTAMP_MS)?;
        c.cts_profile_match = to_bool(mandatory(payload, CTS_PROFILE_MATCH)?, CTS_PROFILE_MATCH)?;

        for (k, v) in payload.iter() {
            match k.as_str() {
                BASIC_INTEGRITY => c.basic_integrity = Some(to_bool(v, k)?),
                APK_PACKAGE_NAME => c.apk_package_name = Some(to_tstr(v, k)?),
                APK_CERTIFICATE_DIGEST_SHA256 => {
                    c.apk_certificate_digest_sha256 = to_bstr_array(v, k)?
                }
                APK_DIGEST_SHA256 => c.apk_digest_sha256 = Some(to_bstr(v, k)?),
                EVALUATION_TYPE => c.evaluation_type = Some(to_tstr(v, k)?),
                ADVICE => c.advice = Some(to_tstr(v, k)?),
                ERROR => c.error = Some(to_tstr(v, k)?),
                _ => continue,
            }
        }

        Ok(c)
    }

    /// The response timestamp as a point in time
    pub fn timestamp(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.timestamp_ms)
    }
}

fn mandatory<'a>(payload: &'a JsonMap, n: &str) -> Result<&'a Value, Error> {
    match payload.get(n) {
        None | Some(Value::Null) => Err(Error::MalformedStructure(format!(
            "missing claim {n}"
        ))),
        Some(v) => Ok(v),
    }
}

/// Compare the echoed nonce with the expected one.  Only the length may leak
/// through timing: equal-length inputs are compared in constant time.
pub fn nonce_matches(nonce: &[u8], expected: &[u8]) -> bool {
    if nonce.len() != expected.len() {
        return false;
    }

    openssl::memcmp::eq(nonce, expected)
}

/// Whether the first subject CN of `leaf` is exactly `hostname`
pub fn leaf_hostname_matches(leaf: &X509Ref, hostname: &str) -> bool {
    match leaf_common_name(leaf) {
        Some(cn) => cn == hostname,
        None => false,
    }
}

pub fn leaf_common_name(leaf: &X509Ref) -> Option<String> {
    let entry = leaf
        .subject_name()
        .entries_by_nid(Nid::COMMONNAME)
        .next()?;

    entry.data().as_utf8().ok().map(|s| s.to_string())
}

/// Whether `timestamp` lies within `leeway` of `now`, bounds included
pub fn timestamp_is_fresh(timestamp: SystemTime, now: SystemTime, leeway: Duration) -> bool {
    let not_before = now.checked_sub(leeway).unwrap_or(UNIX_EPOCH);

    if timestamp < not_before {
        return false;
    }

    match now.checked_add(leeway) {
        Some(not_after) => timestamp <= not_after,
        None => true,
    }
}
