// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::chain::CertificateChain;
use super::claims::{self, Claims, EXPECTED_HOSTNAME};
use super::clock::Clock;
use super::errors::Error;
use super::jws::{JsonMap, Jws};
use super::options::Options;
use super::signature;
use crate::store::{self, ITrustAnchorStore};
use openssl::x509::X509Ref;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// A decoded SafetyNet attestation response.  Decoding splits the JWS,
/// extracts the x5c chain and the claims-set once; nothing is trusted until
/// [`AttestationResponse::verify`] succeeds.
#[derive(Clone, Debug)]
pub struct AttestationResponse {
    jws: Jws,
    chain: CertificateChain,
    claims: Claims,
}

impl AttestationResponse {
    /// Decode a compact JWS SafetyNet response
    pub fn decode(response: &str) -> Result<AttestationResponse, Error> {
        let response = response.trim();

        if response.is_empty() {
            return Err(Error::ResponseMissing("empty attestation response".to_string()));
        }

        trace!(response, "decoding attestation response");

        let jws = Jws::decode(response)?;
        let chain = CertificateChain::from_header(&jws.header)?;
        let claims = Claims::decode(&jws.payload)?;

        Ok(AttestationResponse { jws, chain, claims })
    }

    /// Verify the response.  The checks run in a fixed order and the first
    /// failure is returned:
    ///
    /// 1. a leaf certificate is present
    /// 2. the nonce matches `expected_nonce`
    /// 3. the leaf is issued to `attest.android.com`
    /// 4. the JWS signature verifies with the leaf key
    /// 5. the timestamp is within `options.leeway` of `clock.now()`
    /// 6. the x5c chain leads to one of the trust anchors (only when
    ///    `options.require_trustworthiness` is set)
    pub fn verify(
        &self,
        expected_nonce: &[u8],
        tas: &impl ITrustAnchorStore,
        options: &Options,
        clock: &impl Clock,
    ) -> Result<(), Error> {
        self.verify_inner(expected_nonce, tas, options, clock)
            .map_err(|e| {
                debug!(kind = ?e.kind(), "attestation rejected: {e}");
                e
            })
    }

    fn verify_inner(
        &self,
        expected_nonce: &[u8],
        tas: &impl ITrustAnchorStore,
        options: &Options,
        clock: &impl Clock,
    ) -> Result<(), Error> {
        if self.chain.is_empty() {
            return Err(Error::ResponseMissing("no leaf certificate".to_string()));
        }

        if !claims::nonce_matches(&self.claims.nonce, expected_nonce) {
            return Err(Error::NonceMismatch(format!(
                "got {} bytes, expected {} bytes",
                self.claims.nonce.len(),
                expected_nonce.len()
            )));
        }

        if !claims::leaf_hostname_matches(self.leaf_certificate(), EXPECTED_HOSTNAME) {
            let cn = claims::leaf_common_name(self.leaf_certificate());

            return Err(Error::LeafCertificateSubject(format!(
                "expecting CN={EXPECTED_HOSTNAME}, got {cn:?}"
            )));
        }

        let alg = signature::verify(&self.jws, self.leaf_certificate())?;
        debug!(?alg, "attestation signature verified");

        let now = clock.now();
        if !claims::timestamp_is_fresh(self.claims.timestamp(), now, options.leeway) {
            return Err(Error::Timestamp(format!(
                "timestamp {} ms is more than {}s away from now",
                self.claims.timestamp_ms,
                options.leeway.as_secs()
            )));
        }

        if !options.require_trustworthiness {
            warn!("certificate chain validation skipped on caller request");
            return Ok(());
        }

        let anchors = tas.snapshot();
        store::validate_chain(
            &anchors,
            self.leaf_certificate(),
            self.chain.intermediates(),
            now,
        )
        .map_err(|e| Error::Trustworthiness(e.to_string()))
    }

    /// Whether the timestamp is within `leeway` of `clock.now()`, regardless
    /// of any other check
    pub fn is_timestamp_fresh(&self, clock: &impl Clock, leeway: Duration) -> bool {
        claims::timestamp_is_fresh(self.claims.timestamp(), clock.now(), leeway)
    }

    /// The `ctsProfileMatch` verdict.  Only meaningful after a successful
    /// [`AttestationResponse::verify`].
    pub fn cts_profile_match(&self) -> bool {
        self.claims.cts_profile_match
    }

    /// The `basicIntegrity` verdict, if present
    pub fn basic_integrity(&self) -> Option<bool> {
        self.claims.basic_integrity
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn leaf_certificate(&self) -> &X509Ref {
        self.chain.leaf()
    }

    pub fn certificate_chain(&self) -> &CertificateChain {
        &self.chain
    }

    /// The declared JWS algorithm, as found in the header
    pub fn algorithm(&self) -> Option<&str> {
        self.jws.header.get("alg").and_then(|v| v.as_str())
    }

    pub fn header(&self) -> &JsonMap {
        &self.jws.header
    }

    pub fn payload(&self) -> &JsonMap {
        &self.jws.payload
    }
}

/// Decode and verify `response` in one go, returning the verified response
/// for claim inspection
pub fn verify(
    response: &str,
    expected_nonce: &[u8],
    tas: &impl ITrustAnchorStore,
    options: &Options,
    clock: &impl Clock,
) -> Result<AttestationResponse, Error> {
    let r = AttestationResponse::decode(response)?;

    r.verify(expected_nonce, tas, options, clock)?;

    Ok(r)
}
