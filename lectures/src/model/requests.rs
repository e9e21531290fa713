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

//! Payloads accepted by the REST APIs.
//!
//! Numeric and temporal fields are received as strings and validated by the layers that consume
//! them, so that malformed values are reported with the catalog errors of those layers.  Missing
//! fields decode as empty strings and are left to those layers as well.

use crate::model::Password;
use serde::{Deserialize, Serialize};

/// Request to create a new user.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateUserRequest {
    /// Email address of the new user.
    pub email: String,

    /// First name of the new user.
    pub first_name: String,

    /// Last name of the new user.
    pub last_name: String,

    /// Plaintext password of the new user.
    pub password: Password,

    /// Role of the new user.
    pub role: String,
}

/// Request to create a new lecture.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CreateLectureRequest {
    /// Title of the lecture.
    pub title: String,

    /// Description of the lecture.
    pub description: String,

    /// Person giving the lecture.
    pub speaker: String,

    /// Start time of the lecture in RFC 3339 format.
    pub date: String,

    /// Place where the lecture happens.
    pub location: String,

    /// Length of the lecture as a base-10 integer.
    pub duration: String,
}

/// Request to enroll a student in a lecture.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AddStudentToLectureRequest {
    /// Identifier of the user to enroll.
    pub user_id: String,
}

/// Request to remove a student from a lecture.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DeleteStudentFromLectureRequest {
    /// Identifier of the user to remove.
    pub user_id: String,
}

/// Request to fetch one page of lectures.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GetLecturesPageRequest {
    /// 1-based page number as a base-10 integer.
    pub page: String,

    /// Number of lectures per page as a base-10 integer.
    pub per_page: String,
}
