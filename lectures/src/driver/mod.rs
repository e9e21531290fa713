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

//! Business logic for the service.
//!
//! Services turn wire requests into domain values, validate them and delegate persistence to the
//! repositories.  Errors raised by the repositories are returned unchanged so that clients see the
//! layer that actually failed.

use campus_core::catalog::{CatalogError, CatalogResult};
use log::warn;
use uuid::Uuid;

mod lectures;
pub use lectures::LectureService;
#[cfg(test)]
pub(crate) mod testutils;
mod users;
pub use users::UserService;

/// Business logic shared by all REST handlers.
#[derive(Clone)]
pub struct Driver {
    /// Operations on users.
    users: UserService,

    /// Operations on lectures and their rosters.
    lectures: LectureService,
}

impl Driver {
    /// Creates a new driver backed by the given services.
    pub fn new(users: UserService, lectures: LectureService) -> Self {
        Self { users, lectures }
    }

    /// Returns the service that operates on users.
    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// Returns the service that operates on lectures.
    pub fn lectures(&self) -> &LectureService {
        &self.lectures
    }
}

/// Parses the textual identifier `raw`, reporting failures as a derivation of `entry`.
fn parse_id(raw: &str, entry: &CatalogError) -> CatalogResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| {
        warn!("Rejecting malformed identifier '{}': {}", raw, e);
        entry.append_message(format!("Invalid identifier '{}': {}", raw, e))
    })
}
