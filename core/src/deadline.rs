// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Per-request deadlines.
//!
//! A `Deadline` is computed once when a request enters the service and is then handed down to
//! every layer that performs I/O.  Storage operations wrap their futures with `Deadline::run` so
//! that they fail with `DbError::Timeout` instead of outliving the request.

use crate::db::{DbError, DbResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Horizon used in place of deadlines too far in the future to be represented.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Point in time by which an operation must complete.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Deadline(Instant);

impl Deadline {
    /// Creates a deadline that expires `timeout` from now.
    ///
    /// Timeouts that cannot be represented are clamped to a deadline decades away.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        Self(now.checked_add(timeout).unwrap_or_else(|| now + FAR_FUTURE))
    }

    /// Returns the amount of time left until the deadline expires, or zero if it already did.
    pub fn remaining(&self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }

    /// Awaits `fut` until the deadline expires.
    pub async fn run<F, T>(&self, fut: F) -> DbResult<T>
    where
        F: Future<Output = DbResult<T>>,
    {
        match tokio::time::timeout_at(self.0, fut).await {
            Ok(result) => result,
            Err(_) => Err(DbError::Timeout),
        }
    }
}
