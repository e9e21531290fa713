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

//! The `Lecture` data type.

use crate::model::User;
use derive_getters::Getters;
use time::OffsetDateTime;
use uuid::Uuid;

/// Representation of a lecture and its roster of enrolled students.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct Lecture {
    /// Unique identifier of the lecture.
    id: Uuid,

    /// Title of the lecture.
    title: String,

    /// Description of the lecture contents.
    description: String,

    /// Person giving the lecture.
    speaker: String,

    /// Place where the lecture happens.
    location: String,

    /// Length of the lecture, in the units chosen by the client.
    duration: i64,

    /// Start time of the lecture.
    date: OffsetDateTime,

    /// Students enrolled in the lecture.
    students: Vec<User>,
}

impl Lecture {
    /// Creates a new lecture with an empty roster.
    pub fn new(
        id: Uuid,
        title: String,
        description: String,
        speaker: String,
        location: String,
        duration: i64,
        date: OffsetDateTime,
    ) -> Self {
        Self { id, title, description, speaker, location, duration, date, students: vec![] }
    }

    /// Replaces the roster of the lecture with `students`.
    pub fn with_students(mut self, students: Vec<User>) -> Self {
        self.students = students;
        self
    }
}
