// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The token module provides an [`AttestationResponse`] object to encapsulate
//! the decoding and verification of a SafetyNet attestation response.
//!
//! # Example
//!
//! The following example assumes that `jws` holds the compact JWS returned by
//! the SafetyNet attestation API, and that `nonce` is the challenge the relying
//! party handed to the device.
//!
//! ```no_run
//! use safetynet::store::MemoTrustAnchorStore;
//! use safetynet::token::{AttestationResponse, Options, SystemClock};
//!
//! # let jws = "";
//! # let nonce = b"";
//! // trust the platform's default roots
//! let tas = MemoTrustAnchorStore::new();
//!
//! let r = AttestationResponse::decode(jws).expect("decoding SafetyNet response");
//!
//! // check nonce, leaf hostname, signature, timestamp and certificate chain
//! r.verify(nonce, &tas, &Options::default(), &SystemClock)
//!     .expect("verifying SafetyNet response");
//!
//! // only now is the integrity verdict worth looking at
//! if !r.cts_profile_match() {
//!     // the device failed the compatibility check
//! }
//! ```

pub use self::chain::CertificateChain;
pub use self::claims::{Claims, EXPECTED_HOSTNAME};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::errors::{Error, ErrorKind};
pub use self::jws::{JsonMap, Jws};
pub use self::options::{Options, DEFAULT_LEEWAY};
pub use self::response::{verify, AttestationResponse};
pub use self::signature::ALLOWED_ALGORITHMS;

mod base64;
mod chain;
mod claims;
mod clock;
mod common;
mod errors;
mod jws;
mod options;
mod response;
mod signature;

#[cfg(test)]
pub(crate) mod testutil;
