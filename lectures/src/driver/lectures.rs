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

//! Operations on lectures and their rosters.

use crate::catalog::{
    ADD_STUDENT_TO_LECTURE_SERVICE, CREATE_LECTURE_SERVICE, DELETE_USER_FROM_LECTURE_SERVICE,
    GET_LECTURES_PP_SERVICE,
};
use crate::driver::parse_id;
use crate::mapping;
use crate::model::Pagination;
use crate::model::requests::CreateLectureRequest;
use crate::model::responses::{CreateLectureResponse, LectureSummary};
use crate::repository::LectureRepository;
use campus_core::catalog::CatalogResult;
use campus_core::deadline::Deadline;
use log::{info, warn};
use std::sync::Arc;

/// Parses the textual page parameter `raw` named `name`.
fn parse_page_param(name: &str, raw: &str) -> CatalogResult<i64> {
    raw.parse::<i64>().map_err(|e| {
        warn!("Rejecting malformed {} '{}': {}", name, raw, e);
        GET_LECTURES_PP_SERVICE.append_message(format!("Invalid {} '{}': {}", name, raw, e))
    })
}

/// Business logic for lectures.
#[derive(Clone)]
pub struct LectureService {
    /// Storage of lectures and their rosters.
    lectures: Arc<dyn LectureRepository + Send + Sync>,
}

impl LectureService {
    /// Creates a new service that stores lectures in `lectures`.
    pub fn new(lectures: Arc<dyn LectureRepository + Send + Sync>) -> Self {
        Self { lectures }
    }

    /// Creates a new lecture as described by `request` and returns its identifier.
    pub async fn create_lecture(
        &self,
        deadline: Deadline,
        request: CreateLectureRequest,
    ) -> CatalogResult<CreateLectureResponse> {
        let lecture = mapping::to_lecture(request).map_err(|e| {
            warn!("Rejecting lecture creation: {}", e);
            CREATE_LECTURE_SERVICE.append_message(e)
        })?;
        let lecture_id = self.lectures.create_lecture(deadline, lecture).await?;
        info!("Created lecture {}", lecture_id);
        Ok(CreateLectureResponse::new(lecture_id))
    }

    /// Enrolls the user `user_id` in the lecture `lecture_id` and returns the lecture identifier.
    pub async fn add_user_to_lecture(
        &self,
        deadline: Deadline,
        lecture_id: &str,
        user_id: &str,
    ) -> CatalogResult<String> {
        let user = parse_id(user_id, &ADD_STUDENT_TO_LECTURE_SERVICE)?;
        let lecture = parse_id(lecture_id, &ADD_STUDENT_TO_LECTURE_SERVICE)?;
        self.lectures.add_user_to_lecture(deadline, lecture, user).await?;
        info!("Enrolled user {} in lecture {}", user, lecture);
        Ok(lecture.to_string())
    }

    /// Removes the user `user_id` from the roster of the lecture `lecture_id`.
    pub async fn delete_user_from_lecture(
        &self,
        deadline: Deadline,
        lecture_id: &str,
        user_id: &str,
    ) -> CatalogResult<()> {
        let user = parse_id(user_id, &DELETE_USER_FROM_LECTURE_SERVICE)?;
        let lecture = parse_id(lecture_id, &DELETE_USER_FROM_LECTURE_SERVICE)?;
        self.lectures.drop_user_from_lecture(deadline, lecture, user).await?;
        info!("Removed user {} from lecture {}", user, lecture);
        Ok(())
    }

    /// Gets the 1-based `page` of lectures, holding up to `per_page` entries, newest first.
    ///
    /// Both values are base-10 integers in textual form and must be at least 1.
    pub async fn get_lectures_and_students_pp(
        &self,
        deadline: Deadline,
        page: &str,
        per_page: &str,
    ) -> CatalogResult<Vec<LectureSummary>> {
        let page = parse_page_param("page", page)?;
        let per_page = parse_page_param("per_page", per_page)?;
        let pagination = Pagination::new(page, per_page).map_err(|e| {
            warn!("Rejecting page request: {}", e);
            GET_LECTURES_PP_SERVICE.append_message(e)
        })?;

        let lectures = self.lectures.get_lectures_and_students_pp(deadline, pagination).await?;
        Ok(mapping::to_lecture_list_response(lectures))
    }
}
