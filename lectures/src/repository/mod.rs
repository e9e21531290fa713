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

//! Persistence capabilities needed by the services.
//!
//! Repositories own every storage mutation.  Each operation is bounded by the `Deadline` of the
//! request that triggered it and reports failures as derivations of its own catalog entry, so
//! callers never see raw database errors.

use crate::model::{Lecture, Pagination, User};
use async_trait::async_trait;
use campus_core::catalog::CatalogResult;
use campus_core::deadline::Deadline;
use uuid::Uuid;

mod lectures;
pub use lectures::DbLectureRepository;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
mod users;
pub use users::DbUserRepository;

/// Storage of users.
#[async_trait]
pub trait UserRepository {
    /// Stores a new `user` and returns its identifier as read back from storage.
    async fn create_user(&self, deadline: Deadline, user: User) -> CatalogResult<String>;
}

/// Storage of lectures and their rosters.
#[async_trait]
pub trait LectureRepository {
    /// Stores a new `lecture` and returns its identifier as read back from storage.
    async fn create_lecture(&self, deadline: Deadline, lecture: Lecture) -> CatalogResult<String>;

    /// Enrolls the existing user `user_id` in the existing lecture `lecture_id`.
    ///
    /// Enrolling a user twice leaves a single roster entry.
    async fn add_user_to_lecture(
        &self,
        deadline: Deadline,
        lecture_id: Uuid,
        user_id: Uuid,
    ) -> CatalogResult<()>;

    /// Removes the existing user `user_id` from the roster of the existing lecture `lecture_id`.
    ///
    /// Enrollments of the user in other lectures are left untouched.
    async fn drop_user_from_lecture(
        &self,
        deadline: Deadline,
        lecture_id: Uuid,
        user_id: Uuid,
    ) -> CatalogResult<()>;

    /// Gets the window of lectures described by `pagination`, newest first, with their rosters.
    async fn get_lectures_and_students_pp(
        &self,
        deadline: Deadline,
        pagination: Pagination,
    ) -> CatalogResult<Vec<Lecture>>;
}
