// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Throw-away PKI and JWS minting for unit tests.

use super::base64;
use super::claims::EXPECTED_HOSTNAME;
use crate::store::MemoTrustAnchorStore;
use jsonwebtoken::{Algorithm, EncodingKey};
use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::x509::extension::{BasicConstraints, KeyUsage};
use openssl::x509::{X509NameBuilder, X509};
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

pub const NONCE: &[u8] = b"a fresh server challenge";

/// root CA -> intermediate CA -> leaf (RSA and EC flavours)
pub struct Pki {
    pub root: X509,
    pub intermediate: X509,
    pub leaf: X509,
    pub leaf_key: PKey<Private>,
    pub ec_leaf: X509,
    pub ec_leaf_key: PKey<Private>,
    /// same key as `leaf`, but issued to the wrong hostname
    pub imposter_leaf: X509,
}

impl Pki {
    pub fn new() -> Self {
        let root_key = rsa_key();
        let root = build_cert("Test Root CA", &root_key, None, true);

        let intermediate_key = rsa_key();
        let intermediate = build_cert(
            "Test Intermediate CA",
            &intermediate_key,
            Some((&root, &root_key)),
            true,
        );

        let issuer = Some((&intermediate, &intermediate_key));

        let leaf_key = rsa_key();
        let leaf = build_cert(EXPECTED_HOSTNAME, &leaf_key, issuer, false);
        let imposter_leaf = build_cert("attest.example.com", &leaf_key, issuer, false);

        let ec_leaf_key = ec_key();
        let ec_leaf = build_cert(EXPECTED_HOSTNAME, &ec_leaf_key, issuer, false);

        Self {
            root,
            intermediate,
            leaf,
            leaf_key,
            ec_leaf,
            ec_leaf_key,
            imposter_leaf,
        }
    }

    /// RSA key generation is slow; most tests can share one PKI
    pub fn shared() -> &'static Pki {
        static PKI: OnceLock<Pki> = OnceLock::new();
        PKI.get_or_init(Pki::new)
    }

    pub fn x5c(&self) -> Vec<String> {
        x5c(&[&self.leaf, &self.intermediate])
    }

    pub fn x5c_with_root(&self) -> Vec<String> {
        x5c(&[&self.leaf, &self.intermediate, &self.root])
    }

    pub fn imposter_x5c(&self) -> Vec<String> {
        x5c(&[&self.imposter_leaf, &self.intermediate])
    }

    /// A store trusting only this PKI's root
    pub fn store(&self) -> MemoTrustAnchorStore {
        MemoTrustAnchorStore::with_roots(vec![self.root.clone()])
    }

    /// RS256 JWS signed by `leaf_key`, carrying `x5c`
    pub fn sign_rs256(&self, x5c: &[String], payload: &Value) -> String {
        let h = json!({"alg": "RS256", "x5c": x5c});
        let pem = self.leaf_key.rsa().unwrap().private_key_to_pem().unwrap();
        let key = EncodingKey::from_rsa_pem(&pem).unwrap();

        sign(&h, payload, &key, Algorithm::RS256)
    }

    /// ES256 JWS signed by `ec_leaf_key`
    pub fn sign_es256(&self, payload: &Value) -> String {
        let h = json!({"alg": "ES256", "x5c": x5c(&[&self.ec_leaf, &self.intermediate])});
        let pem = self.ec_leaf_key.private_key_to_pem_pkcs8().unwrap();
        let key = EncodingKey::from_ec_pem(&pem).unwrap();

        sign(&h, payload, &key, Algorithm::ES256)
    }
}

/// A SafetyNet claims-set
pub fn payload(nonce: &[u8], timestamp_ms: i64) -> Value {
    json!({
        "nonce": base64::encode_std(nonce),
        "timestampMs": timestamp_ms,
        "apkPackageName": "com.example.app",
        "apkCertificateDigestSha256": ["S2V5IGRpZ2VzdA=="],
        "apkDigestSha256": "QXBrIGRpZ2VzdA==",
        "ctsProfileMatch": true,
        "basicIntegrity": true,
        "evaluationType": "BASIC,HARDWARE_BACKED"
    })
}

pub fn unix_now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64
}

/// Unsigned compact serialisation with an arbitrary signature segment
pub fn compact(header: &Value, payload: &Value, sig: &[u8]) -> String {
    format!(
        "{}.{}.{}",
        base64::encode_url(header.to_string().as_bytes()),
        base64::encode_url(payload.to_string().as_bytes()),
        base64::encode_url(sig)
    )
}

/// Flip every bit of the signature byte at `idx`
pub fn corrupt_signature(compact: &str, idx: usize) -> String {
    let dot = compact.rfind('.').unwrap();
    let mut sig = base64::decode_url(&compact[dot + 1..]).unwrap();
    sig[idx] ^= 0xff;

    format!("{}.{}", &compact[..dot], base64::encode_url(&sig))
}

fn sign(header: &Value, payload: &Value, key: &EncodingKey, alg: Algorithm) -> String {
    let signing_input = format!(
        "{}.{}",
        base64::encode_url(header.to_string().as_bytes()),
        base64::encode_url(payload.to_string().as_bytes())
    );
    let sig = jsonwebtoken::crypto::sign(signing_input.as_bytes(), key, alg).unwrap();

    format!("{signing_input}.{sig}")
}

fn x5c(certs: &[&X509]) -> Vec<String> {
    certs
        .iter()
        .map(|c| base64::encode_std(&c.to_der().unwrap()))
        .collect()
}

fn rsa_key() -> PKey<Private> {
    PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap()
}

fn ec_key() -> PKey<Private> {
    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
    PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap()
}

fn build_cert(
    cn: &str,
    key: &PKey<Private>,
    issuer: Option<(&X509, &PKey<Private>)>,
    ca: bool,
) -> X509 {
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_nid(Nid::ORGANIZATIONNAME, "Test")
        .unwrap();
    name.append_entry_by_nid(Nid::COMMONNAME, cn).unwrap();
    let name = name.build();

    let mut serial = BigNum::new().unwrap();
    serial.rand(64, MsbOption::MAYBE_ZERO, false).unwrap();

    let now = unix_now_ms() / 1000;

    let mut b = X509::builder().unwrap();
    b.set_version(2).unwrap();
    b.set_serial_number(&serial.to_asn1_integer().unwrap())
        .unwrap();
    b.set_subject_name(&name).unwrap();
    b.set_pubkey(key).unwrap();
    b.set_not_before(&Asn1Time::from_unix((now - 86_400) as _).unwrap())
        .unwrap();
    b.set_not_after(&Asn1Time::from_unix((now + 365 * 86_400) as _).unwrap())
        .unwrap();

    if ca {
        b.append_extension(BasicConstraints::new().critical().ca().build().unwrap())
            .unwrap();
        b.append_extension(
            KeyUsage::new()
                .critical()
                .key_cert_sign()
                .crl_sign()
                .build()
                .unwrap(),
        )
        .unwrap();
    } else {
        b.append_extension(BasicConstraints::new().build().unwrap())
            .unwrap();
        b.append_extension(
            KeyUsage::new()
                .critical()
                .digital_signature()
                .build()
                .unwrap(),
        )
        .unwrap();
    }

    match issuer {
        Some((issuer, issuer_key)) => {
            b.set_issuer_name(issuer.subject_name()).unwrap();
            b.sign(issuer_key, MessageDigest::sha256()).unwrap();
        }
        None => {
            b.set_issuer_name(&name).unwrap();
            b.sign(key, MessageDigest::sha256()).unwrap();
        }
    }

    b.build()
}
