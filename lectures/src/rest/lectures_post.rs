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

//! API to create a new lecture.

use crate::catalog::CREATE_LECTURE_HANDLER;
use crate::driver::Driver;
use crate::model::requests::CreateLectureRequest;
use axum::extract::{Extension, State};
use axum::response::IntoResponse;
use axum::{Json, http};
use bytes::Bytes;
use campus_core::catalog::CatalogResult;
use campus_core::deadline::Deadline;
use campus_core::rest::decode_json;
use log::warn;

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(deadline): Extension<Deadline>,
    body: Bytes,
) -> CatalogResult<impl IntoResponse> {
    let request = decode_json::<CreateLectureRequest>(&body, &CREATE_LECTURE_HANDLER)
        .inspect_err(|e| warn!("{}", e))?;
    let response = driver.lectures().create_lecture(deadline, request).await?;
    Ok((http::StatusCode::CREATED, Json(response)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CREATE_LECTURE_SERVICE;
    use crate::model::responses::CreateLectureResponse;
    use crate::rest::testutils::*;
    use campus_core::rest::testutils::OneShotBuilder;
    use campus_core::test_payload_must_be_json;
    use time::macros::datetime;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/lectures".to_owned())
    }

    fn request(duration: &str, date: &str) -> CreateLectureRequest {
        CreateLectureRequest {
            title: "Compilers".to_owned(),
            description: "Parsing and code generation".to_owned(),
            speaker: "Ada".to_owned(),
            date: date.to_owned(),
            location: "Room 101".to_owned(),
            duration: duration.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request("90", "2024-12-25T08:00:00Z"))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<CreateLectureResponse>()
            .await;

        let lecture = context.get_lecture(&response.lecture_id).await;
        assert_eq!("Compilers", lecture.title());
        assert_eq!("Parsing and code generation", lecture.description());
        assert_eq!("Ada", lecture.speaker());
        assert_eq!("Room 101", lecture.location());
        assert_eq!(90, *lecture.duration());
        assert_eq!(datetime!(2024-12-25 08:00:00 UTC), *lecture.date());
        assert!(lecture.students().is_empty());
    }

    #[tokio::test]
    async fn test_bad_duration() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(request("ninety", "2024-12-25T08:00:00Z"))
            .await
            .expect_catalog_error(&CREATE_LECTURE_SERVICE)
            .await;
    }

    #[tokio::test]
    async fn test_bad_date() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(request("90", "Christmas"))
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("^Failed to CreateLectureServiceErr : Invalid date 'Christmas'")
            .await;
    }

    #[tokio::test]
    async fn test_malformed_payload_does_not_reach_service() {
        let context = RecorderTestContext::setup();

        OneShotBuilder::new(context.app(), route())
            .send_text("not json")
            .await
            .expect_catalog_error(&CREATE_LECTURE_HANDLER)
            .await;

        context.lectures().expect_no_calls().await;
    }

    test_payload_must_be_json!(
        TestContext::setup().await.into_app(),
        route(),
        CREATE_LECTURE_HANDLER
    );
}
