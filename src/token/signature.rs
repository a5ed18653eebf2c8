// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::jws::Jws;
use jsonwebtoken::{Algorithm, DecodingKey};
use openssl::bn::BigNumContext;
use openssl::ec::PointConversionForm;
use openssl::error::ErrorStack;
use openssl::nid::Nid;
use openssl::pkey::Id;
use openssl::x509::X509Ref;
use std::str::FromStr;

const ALG_HEADER: &str = "alg";

/// The only JWS algorithms accepted for the attestation signature.  This is
/// deliberately not configurable.
pub const ALLOWED_ALGORITHMS: [Algorithm; 2] = [Algorithm::RS256, Algorithm::ES256];

/// Verify the JWS signature with the public key of the leaf certificate.
/// Returns the algorithm that was used.
pub fn verify(jws: &Jws, leaf: &X509Ref) -> Result<Algorithm, Error> {
    let alg = allowed_algorithm(jws)?;

    let key = decoding_key(leaf, alg)
        .map_err(|e| Error::Signature(format!("unusable leaf public key: {e}")))?
        .ok_or_else(|| {
            Error::Signature(format!("leaf public key does not match algorithm {alg:?}"))
        })?;

    match jsonwebtoken::crypto::verify(
        jws.encoded_signature(),
        &jws.signing_input(),
        &key,
        alg,
    ) {
        Ok(true) => Ok(alg),
        Ok(false) => Err(Error::Signature(format!(
            "{alg:?} signature does not verify"
        ))),
        Err(e) => Err(Error::Signature(e.to_string())),
    }
}

/// The declared `alg`, provided it is in [`ALLOWED_ALGORITHMS`]
pub fn allowed_algorithm(jws: &Jws) -> Result<Algorithm, Error> {
    let name = jws
        .header
        .get(ALG_HEADER)
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::Signature("missing alg header parameter".to_string()))?;

    match Algorithm::from_str(name) {
        Ok(alg) if ALLOWED_ALGORITHMS.contains(&alg) => Ok(alg),
        _ => Err(Error::Signature(format!("algorithm {name} is not allowed"))),
    }
}

// Ok(None) when the key type cannot be used with `alg`
fn decoding_key(leaf: &X509Ref, alg: Algorithm) -> Result<Option<DecodingKey>, ErrorStack> {
    let pkey = leaf.public_key()?;

    match (alg, pkey.id()) {
        (Algorithm::RS256, Id::RSA) => {
            let der = pkey.rsa()?.public_key_to_der_pkcs1()?;
            Ok(Some(DecodingKey::from_rsa_der(&der)))
        }
        (Algorithm::ES256, Id::EC) => {
            let ec = pkey.ec_key()?;

            if ec.group().curve_name() != Some(Nid::X9_62_PRIME256V1) {
                return Ok(None);
            }

            let mut ctx = BigNumContext::new()?;
            let point =
                ec.public_key()
                    .to_bytes(ec.group(), PointConversionForm::UNCOMPRESSED, &mut ctx)?;

            Ok(Some(DecodingKey::from_ec_der(&point)))
        }
        _ => Ok(None),
    }
}
