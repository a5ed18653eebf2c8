// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

/// Reasons for rejecting a SafetyNet attestation response.  Exactly one is
/// produced per failed verification: the first failing check wins.
#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Response missing: {0}")]
    ResponseMissing(String),
    #[error("Nonce mismatch: {0}")]
    NonceMismatch(String),
    #[error("Leaf certificate subject: {0}")]
    LeafCertificateSubject(String),
    #[error("Signature error: {0}")]
    Signature(String),
    #[error("Timestamp error: {0}")]
    Timestamp(String),
    #[error("Trustworthiness error: {0}")]
    Trustworthiness(String),
    #[error("Malformed structure: {0}")]
    MalformedStructure(String),
}

/// The cause of an [`Error`], without the detail message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ResponseMissing,
    NonceMismatch,
    LeafCertificateSubject,
    Signature,
    Timestamp,
    Trustworthiness,
    MalformedStructure,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ResponseMissing(_) => ErrorKind::ResponseMissing,
            Error::NonceMismatch(_) => ErrorKind::NonceMismatch,
            Error::LeafCertificateSubject(_) => ErrorKind::LeafCertificateSubject,
            Error::Signature(_) => ErrorKind::Signature,
            Error::Timestamp(_) => ErrorKind::Timestamp,
            Error::Trustworthiness(_) => ErrorKind::Trustworthiness,
            Error::MalformedStructure(_) => ErrorKind::MalformedStructure,
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ResponseMissing(e)
            | Error::NonceMismatch(e)
            | Error::LeafCertificateSubject(e)
            | Error::Signature(e)
            | Error::Timestamp(e)
            | Error::Trustworthiness(e)
            | Error::MalformedStructure(e) => {
                write!(f, "{}", e)
            }
        }
    }
}
