// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use std::time::SystemTime;

/// Source of the current time used for freshness and certificate validity
/// checks
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// The host's wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock stuck at a given instant.  Useful for tests and for re-checking a
/// stored response as of the time it was received.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub SystemTime);

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}
