// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use openssl::x509::X509;

/// The set of root certificates an attestation chain must lead to
#[derive(Clone, Debug, Default)]
pub enum TrustAnchors {
    /// The platform's default trusted roots (the OpenSSL default verify paths)
    #[default]
    System,
    /// An explicit set of roots
    Custom(Vec<X509>),
    /// Chain validation is skipped.  Any chain is accepted, so only use this
    /// where no vetted root set is available.
    Disabled,
}

impl TrustAnchors {
    /// Parse every certificate in a PEM bundle
    pub fn from_pem(pem: &[u8]) -> Result<Self, Error> {
        let roots = X509::stack_from_pem(pem).map_err(|e| Error::Syntax(e.to_string()))?;

        if roots.is_empty() {
            return Err(Error::Sema("no certificate found in PEM".to_string()));
        }

        Ok(TrustAnchors::Custom(roots))
    }

    /// Parse a JSON array of PEM-encoded root certificates
    pub fn from_json(j: &str) -> Result<Self, Error> {
        let pems: Vec<String> = serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))?;

        let mut roots = Vec::with_capacity(pems.len());

        for (i, pem) in pems.iter().enumerate() {
            let root = X509::from_pem(pem.as_bytes())
                .map_err(|e| Error::Syntax(format!("root #{i}: {e}")))?;
            roots.push(root);
        }

        Ok(TrustAnchors::Custom(roots))
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, TrustAnchors::Disabled)
    }
}
