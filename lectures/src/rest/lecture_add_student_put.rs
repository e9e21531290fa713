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

//! API to enroll a student in a lecture.

use crate::catalog::ADD_STUDENT_TO_LECTURE_HANDLER;
use crate::driver::Driver;
use crate::model::requests::AddStudentToLectureRequest;
use crate::model::responses::AddStudentToLectureResponse;
use axum::Json;
use axum::extract::{Extension, Path, State};
use bytes::Bytes;
use campus_core::catalog::CatalogResult;
use campus_core::deadline::Deadline;
use campus_core::rest::{decode_json, required_path_param};
use log::warn;
use std::collections::HashMap;

/// PUT handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(deadline): Extension<Deadline>,
    Path(params): Path<HashMap<String, String>>,
    body: Bytes,
) -> CatalogResult<Json<AddStudentToLectureResponse>> {
    let lecture_id = required_path_param(&params, "lecture_id", &ADD_STUDENT_TO_LECTURE_HANDLER)
        .inspect_err(|e| warn!("{}", e))?;
    let request = decode_json::<AddStudentToLectureRequest>(&body, &ADD_STUDENT_TO_LECTURE_HANDLER)
        .inspect_err(|e| warn!("{}", e))?;

    let lecture_id =
        driver.lectures().add_user_to_lecture(deadline, lecture_id, &request.user_id).await?;
    Ok(Json(AddStudentToLectureResponse::new(lecture_id)))
}
