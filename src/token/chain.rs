// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::base64;
use super::errors::Error;
use super::jws::JsonMap;
use openssl::x509::X509;
use serde_json::Value;

const X5C_HEADER: &str = "x5c";

/// The certificates carried in the `x5c` JOSE header, in header order.  The
/// first one is the leaf, whose key signed the JWS; it is never empty.
#[derive(Clone, Debug)]
pub struct CertificateChain {
    certs: Vec<X509>,
}

impl CertificateChain {
    /// Extract the chain from a decoded JOSE header
    pub fn from_header(header: &JsonMap) -> Result<CertificateChain, Error> {
        let entries = match header.get(X5C_HEADER) {
            None | Some(Value::Null) => {
                return Err(Error::ResponseMissing(
                    "no x5c certificate chain in header".to_string(),
                ))
            }
            Some(Value::Array(a)) => a,
            Some(_) => {
                return Err(Error::MalformedStructure(
                    "x5c header is not an array".to_string(),
                ))
            }
        };

        if entries.is_empty() {
            return Err(Error::ResponseMissing(
                "x5c certificate chain is empty".to_string(),
            ));
        }

        let certs = entries
            .iter()
            .enumerate()
            .map(|(i, v)| parse_entry(i, v))
            .collect::<Result<Vec<X509>, Error>>()?;

        Ok(CertificateChain { certs })
    }

    /// The end-entity certificate
    pub fn leaf(&self) -> &X509 {
        &self.certs[0]
    }

    /// Every certificate after the leaf, in header order
    pub fn intermediates(&self) -> &[X509] {
        &self.certs[1..]
    }

    pub fn certificates(&self) -> &[X509] {
        &self.certs
    }

    pub fn len(&self) -> usize {
        self.certs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certs.is_empty()
    }
}

fn parse_entry(i: usize, v: &Value) -> Result<X509, Error> {
    let s = v
        .as_str()
        .ok_or_else(|| Error::MalformedStructure(format!("x5c[{i}] is not a string")))?;

    let der = base64::decode_std(s)
        .map_err(|e| Error::MalformedStructure(format!("x5c[{i}]: {e:?}")))?;

    X509::from_der(&der).map_err(|e| Error::MalformedStructure(format!("x5c[{i}]: {e}")))
}
