// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::trustanchor::TrustAnchors;
use std::sync::Arc;

/// Interface to the store where the trusted root certificates are stashed.
pub trait ITrustAnchorStore {
    /// A consistent view of the current trust anchors.  Later changes to the
    /// store do not affect a snapshot already handed out.
    fn snapshot(&self) -> Arc<TrustAnchors>;
}
