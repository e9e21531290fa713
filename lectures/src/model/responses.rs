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

//! Payloads returned by the REST APIs.

use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Response to a successful user creation.
#[derive(Constructor, Debug, Deserialize, PartialEq, Serialize)]
pub struct CreateUserResponse {
    /// Identifier assigned to the new user.
    pub user_id: String,
}

/// Response to a successful lecture creation.
#[derive(Constructor, Debug, Deserialize, PartialEq, Serialize)]
pub struct CreateLectureResponse {
    /// Identifier assigned to the new lecture.
    pub lecture_id: String,
}

/// Response to a successful enrollment.
#[derive(Constructor, Debug, Deserialize, PartialEq, Serialize)]
pub struct AddStudentToLectureResponse {
    /// Identifier of the lecture the student was enrolled in.
    pub lecture_id: String,
}

/// Response to a successful removal from a lecture.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct DeleteStudentFromLectureResponse {
    /// Outcome of the operation.
    pub result: String,
}

impl DeleteStudentFromLectureResponse {
    /// Creates the response for a removal that went through.
    pub fn success() -> Self {
        Self { result: "Success".to_owned() }
    }
}

/// Summary of a lecture and its roster, as returned in lecture listings.
#[derive(Constructor, Debug, Deserialize, PartialEq, Serialize)]
pub struct LectureSummary {
    /// Identifier of the lecture.
    pub lecture_id: String,

    /// Title of the lecture.
    pub title: String,

    /// Students enrolled in the lecture.
    pub students: Vec<StudentSummary>,
}

/// Summary of a student enrolled in a lecture.
#[derive(Constructor, Debug, Deserialize, PartialEq, Serialize)]
pub struct StudentSummary {
    /// Identifier of the student.
    pub student_id: String,

    /// Email address of the student.
    pub user_email: String,
}
