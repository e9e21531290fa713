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

//! Test doubles for the repositories.

use crate::model::{Lecture, Pagination, User};
use crate::repository::{LectureRepository, UserRepository};
use async_trait::async_trait;
use campus_core::catalog::{CatalogError, CatalogResult};
use campus_core::deadline::Deadline;
use futures::lock::Mutex;
use std::sync::Arc;
use uuid::Uuid;

/// Returns a copy of the injected error, if any.
async fn injected(error: &Mutex<Option<CatalogError>>) -> CatalogResult<()> {
    match error.lock().await.as_ref() {
        Some(e) => Err(e.clone()),
        None => Ok(()),
    }
}

/// User repository that captures the users it is asked to store.
#[derive(Clone, Default)]
pub struct RecorderUserRepository {
    /// Storage for captured users.
    pub users: Arc<Mutex<Vec<User>>>,

    /// Error to return from every operation, if any.
    error: Arc<Mutex<Option<CatalogError>>>,
}

impl RecorderUserRepository {
    /// Makes all operations fail with `err`.
    pub async fn inject_error(&self, err: CatalogError) {
        *self.error.lock().await = Some(err);
    }

    /// Expects that no users were stored.
    pub async fn expect_no_calls(&self) {
        let users = self.users.lock().await;
        assert!(users.is_empty(), "Expected no users to be stored but got {:?}", users);
    }

    /// Expects that exactly one user was stored and returns it.
    pub async fn expect_one_user(&self) -> User {
        let users = self.users.lock().await;
        assert_eq!(1, users.len(), "Expected exactly one stored user");
        users[0].clone()
    }
}

#[async_trait]
impl UserRepository for RecorderUserRepository {
    async fn create_user(&self, _deadline: Deadline, user: User) -> CatalogResult<String> {
        injected(&self.error).await?;
        let id = user.id().to_string();
        self.users.lock().await.push(user);
        Ok(id)
    }
}

/// Lecture repository that captures every call and serves a canned page of lectures.
#[derive(Clone, Default)]
pub struct RecorderLectureRepository {
    /// Storage for captured lectures.
    pub lectures: Arc<Mutex<Vec<Lecture>>>,

    /// Captured enrollments as `(lecture_id, user_id)` pairs.
    pub additions: Arc<Mutex<Vec<(Uuid, Uuid)>>>,

    /// Captured removals as `(lecture_id, user_id)` pairs.
    pub removals: Arc<Mutex<Vec<(Uuid, Uuid)>>>,

    /// Captured page requests.
    pub paginations: Arc<Mutex<Vec<Pagination>>>,

    /// Lectures to return for any page request.
    page: Arc<Mutex<Vec<Lecture>>>,

    /// Error to return from every operation, if any.
    error: Arc<Mutex<Option<CatalogError>>>,
}

impl RecorderLectureRepository {
    /// Makes all operations fail with `err`.
    pub async fn inject_error(&self, err: CatalogError) {
        *self.error.lock().await = Some(err);
    }

    /// Sets the lectures to return for any page request.
    pub async fn set_page(&self, lectures: Vec<Lecture>) {
        *self.page.lock().await = lectures;
    }

    /// Expects that no operation was invoked.
    pub async fn expect_no_calls(&self) {
        assert!(self.lectures.lock().await.is_empty(), "Expected no stored lectures");
        assert!(self.additions.lock().await.is_empty(), "Expected no enrollments");
        assert!(self.removals.lock().await.is_empty(), "Expected no removals");
        assert!(self.paginations.lock().await.is_empty(), "Expected no page requests");
    }
}

#[async_trait]
impl LectureRepository for RecorderLectureRepository {
    async fn create_lecture(&self, _deadline: Deadline, lecture: Lecture) -> CatalogResult<String> {
        injected(&self.error).await?;
        let id = lecture.id().to_string();
        self.lectures.lock().await.push(lecture);
        Ok(id)
    }

    async fn add_user_to_lecture(
        &self,
        _deadline: Deadline,
        lecture_id: Uuid,
        user_id: Uuid,
    ) -> CatalogResult<()> {
        injected(&self.error).await?;
        self.additions.lock().await.push((lecture_id, user_id));
        Ok(())
    }

    async fn drop_user_from_lecture(
        &self,
        _deadline: Deadline,
        lecture_id: Uuid,
        user_id: Uuid,
    ) -> CatalogResult<()> {
        injected(&self.error).await?;
        self.removals.lock().await.push((lecture_id, user_id));
        Ok(())
    }

    async fn get_lectures_and_students_pp(
        &self,
        _deadline: Deadline,
        pagination: Pagination,
    ) -> CatalogResult<Vec<Lecture>> {
        injected(&self.error).await?;
        self.paginations.lock().await.push(pagination);
        Ok(self.page.lock().await.clone())
    }
}
