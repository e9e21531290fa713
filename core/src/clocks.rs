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

//! Collection of clock implementations.

use time::OffsetDateTime;

/// Generic definition of a clock.
pub trait Clock {
    /// Returns the current UTC time.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock implementation that uses the system clock.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();

        // Truncate the timestamp to microsecond resolution as this is the resolution supported by
        // timestamps in the PostgreSQL database.
        let nanos = nanos / 1000 * 1000;

        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .expect("nanos must be in range because they come from the current timestamp")
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;

    /// Converts a timestamp to microseconds, rejecting timestamps with finer precision.
    fn to_micros(ts: OffsetDateTime) -> u64 {
        let nanos = ts.unix_timestamp_nanos();
        assert!(nanos % 1000 == 0, "Nanosecond precision not supported");
        u64::try_from(nanos / 1000).expect("Test timestamps must be positive")
    }

    /// Converts microseconds back to a timestamp.
    fn from_micros(micros: u64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(micros) * 1000)
            .expect("Test timestamps must be in range")
    }

    /// A clock that returns a preconfigured instant and that can be modified at will.
    ///
    /// Only supports microsecond-level precision.
    pub struct SettableClock {
        /// Current fake time in microseconds.
        now_us: AtomicU64,
    }

    impl SettableClock {
        /// Creates a new clock that returns `now` until reconfigured with `set`.
        pub fn new(now: OffsetDateTime) -> Self {
            Self { now_us: AtomicU64::new(to_micros(now)) }
        }

        /// Sets the new value of `now` that the clock returns.
        pub fn set(&self, now: OffsetDateTime) {
            self.now_us.store(to_micros(now), Ordering::SeqCst);
        }

        /// Advances the current time by `delta`.
        pub fn advance(&self, delta: Duration) {
            let delta_ns = delta.as_nanos();
            assert!(delta_ns % 1000 == 0, "Nanosecond precision not supported");
            let delta_us = u64::try_from(delta_ns / 1000).expect("Delta must fit");
            self.now_us.fetch_add(delta_us, Ordering::SeqCst);
        }
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            from_micros(self.now_us.load(Ordering::SeqCst))
        }
    }

    /// A clock that advances by a fixed step every time it is queried.
    ///
    /// Useful to give every stored entity a distinct creation time so that orderings by time are
    /// deterministic in tests.
    pub struct MonotonicClock {
        /// Time to return on the next query, in microseconds.
        next_us: AtomicU64,

        /// Amount of time to advance after every query, in microseconds.
        step_us: u64,
    }

    impl MonotonicClock {
        /// Creates a new clock that starts at `start` and advances one second per query.
        pub fn new(start: OffsetDateTime) -> Self {
            Self::with_step(start, Duration::from_secs(1))
        }

        /// Creates a new clock that starts at `start` and advances `step` per query.
        pub fn with_step(start: OffsetDateTime, step: Duration) -> Self {
            let step_us = u64::try_from(step.as_micros()).expect("Step must fit");
            assert!(step_us > 0, "Step must be at least one microsecond");
            Self { next_us: AtomicU64::new(to_micros(start)), step_us }
        }
    }

    impl Clock for MonotonicClock {
        fn now_utc(&self) -> OffsetDateTime {
            from_micros(self.next_us.fetch_add(self.step_us, Ordering::SeqCst))
        }
    }

}
