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

//! Test utilities for the business layer.

use crate::driver::{Driver, LectureService, UserService};
use crate::repository::testutils::{RecorderLectureRepository, RecorderUserRepository};
use campus_core::deadline::Deadline;
use std::sync::Arc;
use std::time::Duration;

/// Cheapest cost accepted by bcrypt, to keep tests fast.
pub(crate) const TEST_HASH_COST: u32 = 4;

/// State of a driver backed by recording repositories.
pub(crate) struct TestContext {
    /// Recorder behind the user service.
    users: RecorderUserRepository,

    /// Recorder behind the lecture service.
    lectures: RecorderLectureRepository,

    /// Driver under test.
    driver: Driver,
}

impl TestContext {
    /// Creates a driver whose repositories record every call.
    pub(crate) fn setup() -> Self {
        let _can_fail = env_logger::builder().is_test(true).try_init();

        let users = RecorderUserRepository::default();
        let lectures = RecorderLectureRepository::default();
        let driver = Driver::new(
            UserService::new(Arc::new(users.clone()), TEST_HASH_COST),
            LectureService::new(Arc::new(lectures.clone())),
        );
        Self { users, lectures, driver }
    }

    /// Returns a deadline that does not expire during a test.
    pub(crate) fn deadline(&self) -> Deadline {
        Deadline::after(Duration::from_secs(60))
    }

    /// Returns the recorder behind the user service.
    pub(crate) fn users(&self) -> &RecorderUserRepository {
        &self.users
    }

    /// Returns the recorder behind the lecture service.
    pub(crate) fn lectures(&self) -> &RecorderLectureRepository {
        &self.lectures
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }
}
