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

//! Conversions between the wire types and the domain types.

use crate::model::requests::{CreateLectureRequest, CreateUserRequest};
use crate::model::responses::{LectureSummary, StudentSummary};
use crate::model::{Lecture, Password, User};
use campus_core::model::{ModelError, ModelResult};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Converts a user creation request into a new user with a fresh identifier.
///
/// The password is carried over in plaintext and must be hashed before storage.
pub fn to_user(request: CreateUserRequest) -> User<Password> {
    User::new(
        Uuid::new_v4(),
        request.email,
        request.first_name,
        request.last_name,
        request.password,
        request.role,
    )
}

/// Converts a lecture creation request into a new lecture with a fresh identifier and no students.
pub fn to_lecture(request: CreateLectureRequest) -> ModelResult<Lecture> {
    let duration = request.duration.parse::<i64>().map_err(|e| {
        ModelError(format!("Invalid duration '{}': {}", request.duration, e))
    })?;
    let date = OffsetDateTime::parse(&request.date, &Rfc3339)
        .map_err(|e| ModelError(format!("Invalid date '{}': {}", request.date, e)))?;

    Ok(Lecture::new(
        Uuid::new_v4(),
        request.title,
        request.description,
        request.speaker,
        request.location,
        duration,
        date,
    ))
}

/// Summarizes `lectures` and their rosters for listing, preserving their order.
pub fn to_lecture_list_response(lectures: Vec<Lecture>) -> Vec<LectureSummary> {
    lectures
        .into_iter()
        .map(|lecture| {
            let students = lecture
                .students()
                .iter()
                .map(|user| StudentSummary::new(user.id().to_string(), user.email().clone()))
                .collect();
            LectureSummary::new(lecture.id().to_string(), lecture.title().clone(), students)
        })
        .collect()
}
