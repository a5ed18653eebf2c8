// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

pub use self::chain_validator::validate_chain;
pub use self::errors::Error;
pub use self::itrustanchorstore::ITrustAnchorStore;
pub use self::memo_trustanchorstore::MemoTrustAnchorStore;
pub use self::trustanchor::TrustAnchors;

mod chain_validator;
mod errors;
mod itrustanchorstore;
mod memo_trustanchorstore;
mod trustanchor;
