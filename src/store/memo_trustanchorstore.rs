// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::trustanchor::TrustAnchors;
use super::ITrustAnchorStore;
use openssl::x509::X509;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// The store where the trusted roots are stashed.  It can be shared between
/// threads and reconfigured while verifications are in flight: each
/// verification works on the snapshot it took when it started.
#[derive(Debug)]
pub struct MemoTrustAnchorStore {
    p: RwLock<Arc<TrustAnchors>>,
}

impl Default for MemoTrustAnchorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoTrustAnchorStore {
    /// Returns a new TrustAnchorStore that trusts the platform's default roots
    pub fn new() -> Self {
        Self::from_anchors(TrustAnchors::System)
    }

    /// Returns a new TrustAnchorStore that trusts only `roots`
    pub fn with_roots(roots: Vec<X509>) -> Self {
        Self::from_anchors(TrustAnchors::Custom(roots))
    }

    /// Returns a new TrustAnchorStore that accepts any certificate chain
    pub fn disabled() -> Self {
        warn!("trust anchor store created with chain validation disabled");
        Self::from_anchors(TrustAnchors::Disabled)
    }

    pub fn from_anchors(anchors: TrustAnchors) -> Self {
        Self {
            p: RwLock::new(Arc::new(anchors)),
        }
    }

    /// Atomically swap in a new set of trust anchors
    pub fn replace(&self, anchors: TrustAnchors) {
        if anchors.is_disabled() {
            warn!("trust anchor store: chain validation disabled");
        }

        *self.p.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(anchors);
    }

    pub fn disable(&self) {
        self.replace(TrustAnchors::Disabled);
    }

    /// Add the roots found in the given PEM bundle.  If the store is not
    /// already holding a custom set (i.e., it is using the system roots or is
    /// disabled), the bundle becomes the new custom set.
    pub fn load_pem(&self, pem: &[u8]) -> Result<(), Error> {
        self.extend(TrustAnchors::from_pem(pem)?)
    }

    /// Add the roots found in the given JSON array of PEM certificates, with
    /// the same semantics as [`MemoTrustAnchorStore::load_pem`]
    pub fn load_json(&self, j: &str) -> Result<(), Error> {
        self.extend(TrustAnchors::from_json(j)?)
    }

    fn extend(&self, loaded: TrustAnchors) -> Result<(), Error> {
        let TrustAnchors::Custom(mut new_roots) = loaded else {
            return Err(Error::Sema("expecting custom trust anchors".to_string()));
        };

        let mut p = self.p.write().unwrap_or_else(PoisonError::into_inner);

        let mut roots = match p.as_ref() {
            TrustAnchors::Custom(current) => current.clone(),
            _ => Vec::new(),
        };
        roots.append(&mut new_roots);

        debug!("trust anchor store now holds {} custom roots", roots.len());

        *p = Arc::new(TrustAnchors::Custom(roots));

        Ok(())
    }
}

impl ITrustAnchorStore for MemoTrustAnchorStore {
    fn snapshot(&self) -> Arc<TrustAnchors> {
        self.p.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
