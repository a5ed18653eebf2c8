// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Error;
use std::time::Duration;

pub const DEFAULT_LEEWAY: Duration = Duration::from_secs(60);

/// Per-call verification settings
#[serde_with::serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Validate the x5c chain against the trust anchor store.  Turning this
    /// off means the response is only as trustworthy as its self-asserted
    /// leaf certificate.
    #[serde(rename = "require-trustworthiness")]
    pub require_trustworthiness: bool,

    /// Tolerated distance between the response timestamp and the current time
    #[serde(rename = "leeway-secs")]
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub leeway: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            require_trustworthiness: true,
            leeway: DEFAULT_LEEWAY,
        }
    }
}

impl Options {
    /// Parse verification options from JSON.  Absent fields take their
    /// default value.
    pub fn load_json(j: &str) -> Result<Self, Error> {
        serde_json::from_str(j)
    }

    /// Skip certificate chain validation
    pub fn without_trustworthiness(self) -> Self {
        Self {
            require_trustworthiness: false,
            ..self
        }
    }

    pub fn with_leeway(self, leeway: Duration) -> Self {
        Self { leeway, ..self }
    }
}
