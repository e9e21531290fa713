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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::testutils::{TEST_HASH_COST, TestContext as DriverTestContext};
use crate::driver::{Driver, LectureService, UserService};
use crate::model::{HashedPassword, Lecture, User};
use crate::repository::testutils::{RecorderLectureRepository, RecorderUserRepository};
use crate::repository::{DbLectureRepository, DbUserRepository};
use crate::rest::app;
use axum::Router;
use campus_core::clocks::testutils::MonotonicClock;
use campus_core::db::Db;
use std::sync::Arc;
use std::time::Duration;
use time::macros::datetime;
use uuid::Uuid;

/// Request timeout for tests, long enough to never expire.
const TEST_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// State of a server backed by an in-memory database.
pub(crate) struct TestContext {
    /// The database backing the server.
    db: Arc<dyn Db + Send + Sync>,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Creates a server backed by a fresh in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(campus_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(MonotonicClock::new(datetime!(2024-12-01 10:00:00 UTC)));

        let users = DbUserRepository::new(db.clone(), clock.clone());
        let lectures = DbLectureRepository::new(db.clone(), clock);
        let driver = Driver::new(
            UserService::new(Arc::new(users), TEST_HASH_COST),
            LectureService::new(Arc::new(lectures)),
        );
        let app = app(driver, TEST_REQUEST_TIMEOUT);
        Self { db, app }
    }

    /// Returns a copy of the router under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the router under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates a user named `name` directly in the database.
    pub(crate) async fn create_user(&self, name: &str) -> User {
        let user = User::new(
            Uuid::new_v4(),
            format!("{}@example.com", name),
            name.to_owned(),
            "Doe".to_owned(),
            HashedPassword::new("hash"),
            "student".to_owned(),
        );
        let now = datetime!(2024-11-01 00:00:00 UTC);
        db::create_user(&mut self.db.ex().await.unwrap(), &user, now).await.unwrap();
        user
    }

    /// Creates a lecture titled `title` directly in the database at creation time `now`.
    pub(crate) async fn create_lecture(&self, title: &str, now: time::OffsetDateTime) -> Lecture {
        let lecture = Lecture::new(
            Uuid::new_v4(),
            title.to_owned(),
            format!("All about {}", title),
            "Ada".to_owned(),
            "Room 101".to_owned(),
            60,
            datetime!(2024-12-25 08:00:00 UTC),
        );
        db::create_lecture(&mut self.db.ex().await.unwrap(), &lecture, now).await.unwrap();
        lecture
    }

    /// Gets a user directly from the database.
    pub(crate) async fn get_user(&self, id: &str) -> User {
        let id = Uuid::parse_str(id).unwrap();
        db::get_user(&mut self.db.ex().await.unwrap(), id).await.unwrap()
    }

    /// Gets a lecture directly from the database.
    pub(crate) async fn get_lecture(&self, id: &str) -> Lecture {
        let id = Uuid::parse_str(id).unwrap();
        db::get_lecture(&mut self.db.ex().await.unwrap(), id).await.unwrap()
    }

    /// Enrolls `user` in `lecture` directly in the database.
    pub(crate) async fn enroll(&self, lecture: &Lecture, user: &User) {
        let now = datetime!(2024-11-02 00:00:00 UTC);
        db::add_lecture_student(&mut self.db.ex().await.unwrap(), *lecture.id(), *user.id(), now)
            .await
            .unwrap();
    }
}

/// State of a server backed by recording repositories.
pub(crate) struct RecorderTestContext {
    /// State of the driver behind the server.
    inner: DriverTestContext,

    /// The router under test.
    app: Router,
}

impl RecorderTestContext {
    /// Creates a server whose repositories record every call.
    pub(crate) fn setup() -> Self {
        let inner = DriverTestContext::setup();
        let app = app(inner.driver(), TEST_REQUEST_TIMEOUT);
        Self { inner, app }
    }

    /// Returns a copy of the router under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Returns the recorder behind the user service.
    pub(crate) fn users(&self) -> &RecorderUserRepository {
        self.inner.users()
    }

    /// Returns the recorder behind the lecture service.
    pub(crate) fn lectures(&self) -> &RecorderLectureRepository {
        self.inner.lectures()
    }
}
