// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::trustanchor::TrustAnchors;
use openssl::error::ErrorStack;
use openssl::stack::Stack;
use openssl::x509::store::{X509Store, X509StoreBuilder};
use openssl::x509::verify::X509VerifyParam;
use openssl::x509::{X509Ref, X509StoreContext, X509VerifyResult, X509};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Build a certification path from `leaf` to one of the trust anchors, using
/// `intermediates` as the untrusted candidate issuers.  Signatures, validity
/// periods (as of `at`) and basic constraints are checked by OpenSSL.
///
/// A disabled trust anchor set accepts any chain.
pub fn validate_chain(
    anchors: &TrustAnchors,
    leaf: &X509Ref,
    intermediates: &[X509],
    at: SystemTime,
) -> Result<(), Error> {
    if anchors.is_disabled() {
        warn!("trust anchors disabled: certificate chain accepted without validation");
        return Ok(());
    }

    let store = build_store(anchors, at)
        .map_err(|e| Error::Sema(format!("building X.509 store: {e}")))?;

    let (res, depth) = verify(&store, leaf, intermediates)
        .map_err(|e| Error::Untrusted(format!("path validation: {e}")))?;

    if res != X509VerifyResult::OK {
        debug!("chain verification failed at depth {depth}: {res}");

        return Err(Error::Untrusted(format!("{res} (depth {depth})")));
    }

    Ok(())
}

fn build_store(anchors: &TrustAnchors, at: SystemTime) -> Result<X509Store, ErrorStack> {
    let mut builder = X509StoreBuilder::new()?;

    match anchors {
        TrustAnchors::System => builder.set_default_paths()?,
        TrustAnchors::Custom(roots) => {
            for root in roots {
                builder.add_cert(root.clone())?;
            }
        }
        TrustAnchors::Disabled => {}
    }

    let secs = at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut param = X509VerifyParam::new()?;
    param.set_time(secs as _);
    builder.set_param(&param)?;

    Ok(builder.build())
}

fn verify(
    store: &X509Store,
    leaf: &X509Ref,
    intermediates: &[X509],
) -> Result<(X509VerifyResult, u32), ErrorStack> {
    let mut chain = Stack::new()?;

    for crt in intermediates {
        chain.push(crt.clone())?;
    }

    let mut ctx = X509StoreContext::new()?;

    // the boolean returned by verify_cert is ignored in favour of the richer
    // error() result
    ctx.init(store, leaf, &chain, |c| {
        c.verify_cert()?;
        Ok((c.error(), c.error_depth()))
    })
}
