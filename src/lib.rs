// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Android SafetyNet attestation response verification.
//!
//! This crate provides an API to decode and verify the device integrity
//! statement returned by the SafetyNet Attestation API, before a relying party
//! accepts it (e.g., as part of a WebAuthn `android-safetynet` registration).
//!
//! The API allows:
//! * Decoding the compact JWS and its `x5c` certificate chain
//! * Checking the nonce, the leaf certificate hostname and the timestamp
//! * Cryptographically verifying the JWS signature (RS256 or ES256 only)
//! * Validating the certificate chain against a configurable trust anchor store
//!
//! Each failure is reported as a distinct [`token::Error`] variant.

pub mod store;
pub mod token;
