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

//! API to remove a student from a lecture.

use crate::catalog::DELETE_USER_FROM_LECTURE_HANDLER;
use crate::driver::Driver;
use crate::model::requests::DeleteStudentFromLectureRequest;
use crate::model::responses::DeleteStudentFromLectureResponse;
use axum::Json;
use axum::extract::{Extension, Path, State};
use bytes::Bytes;
use campus_core::catalog::CatalogResult;
use campus_core::deadline::Deadline;
use campus_core::rest::{decode_json, required_path_param};
use log::warn;
use std::collections::HashMap;

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(deadline): Extension<Deadline>,
    Path(params): Path<HashMap<String, String>>,
    body: Bytes,
) -> CatalogResult<Json<DeleteStudentFromLectureResponse>> {
    let lecture_id = required_path_param(&params, "lecture_id", &DELETE_USER_FROM_LECTURE_HANDLER)
        .inspect_err(|e| warn!("{}", e))?;
    let request =
        decode_json::<DeleteStudentFromLectureRequest>(&body, &DELETE_USER_FROM_LECTURE_HANDLER)
            .inspect_err(|e| warn!("{}", e))?;

    driver.lectures().delete_user_from_lecture(deadline, lecture_id, &request.user_id).await?;
    Ok(Json(DeleteStudentFromLectureResponse::success()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DELETE_USER_FROM_LECTURE_SERVICE, DROP_USER_FROM_LECTURE_REPO};
    use crate::rest::testutils::*;
    use axum::http;
    use campus_core::rest::testutils::OneShotBuilder;
    use campus_core::test_payload_must_be_json;
    use time::macros::datetime;
    use uuid::Uuid;

    fn route(lecture_id: &str) -> (http::Method, String) {
        (http::Method::DELETE, format!("/lectures/{}/remove-student", lecture_id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;
        let john = context.create_user("john").await;
        let lecture = context.create_lecture("rust", datetime!(2024-12-01 09:00:00 UTC)).await;
        context.enroll(&lecture, &jane).await;
        context.enroll(&lecture, &john).await;

        let request = DeleteStudentFromLectureRequest { user_id: jane.id().to_string() };
        let response = OneShotBuilder::new(context.app(), route(&lecture.id().to_string()))
            .send_json(request)
            .await
            .expect_json::<DeleteStudentFromLectureResponse>()
            .await;
        assert_eq!(DeleteStudentFromLectureResponse::success(), response);

        let stored = context.get_lecture(&lecture.id().to_string()).await;
        assert_eq!(vec![john], *stored.students());
    }

    #[tokio::test]
    async fn test_other_lectures_unaffected() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;
        let rust = context.create_lecture("rust", datetime!(2024-12-01 09:00:00 UTC)).await;
        let sql = context.create_lecture("sql", datetime!(2024-12-01 09:00:01 UTC)).await;
        context.enroll(&rust, &jane).await;
        context.enroll(&sql, &jane).await;

        let request = DeleteStudentFromLectureRequest { user_id: jane.id().to_string() };
        OneShotBuilder::new(context.app(), route(&rust.id().to_string()))
            .send_json(request)
            .await
            .expect_json::<DeleteStudentFromLectureResponse>()
            .await;

        assert!(context.get_lecture(&rust.id().to_string()).await.students().is_empty());
        assert_eq!(vec![jane], *context.get_lecture(&sql.id().to_string()).await.students());
    }

    #[tokio::test]
    async fn test_not_enrolled() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;
        let lecture = context.create_lecture("rust", datetime!(2024-12-01 09:00:00 UTC)).await;

        let request = DeleteStudentFromLectureRequest { user_id: jane.id().to_string() };
        let response = OneShotBuilder::new(context.app(), route(&lecture.id().to_string()))
            .send_json(request)
            .await
            .expect_json::<DeleteStudentFromLectureResponse>()
            .await;
        assert_eq!("Success", response.result);
    }

    #[tokio::test]
    async fn test_unknown_lecture() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;

        let request = DeleteStudentFromLectureRequest { user_id: jane.id().to_string() };
        OneShotBuilder::new(context.app(), route(&Uuid::new_v4().to_string()))
            .send_json(request)
            .await
            .expect_catalog_error(&DROP_USER_FROM_LECTURE_REPO)
            .await;
    }

    #[tokio::test]
    async fn test_bad_ids() {
        let context = RecorderTestContext::setup();

        let cases = [
            ("not-a-uuid".to_owned(), Uuid::new_v4().to_string()),
            (Uuid::new_v4().to_string(), "x".to_owned()),
        ];
        for (lecture_id, user_id) in cases {
            let request = DeleteStudentFromLectureRequest { user_id };
            OneShotBuilder::new(context.app(), route(&lecture_id))
                .send_json(request)
                .await
                .expect_catalog_error(&DELETE_USER_FROM_LECTURE_SERVICE)
                .await;
        }

        context.lectures().expect_no_calls().await;
    }

    #[tokio::test]
    async fn test_missing_user_id_reaches_service() {
        let context = RecorderTestContext::setup();

        OneShotBuilder::new(context.app(), route(&Uuid::new_v4().to_string()))
            .send_text("{}")
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("^Failed to DeleteUserFromLectureServiceErr : Invalid identifier ''")
            .await;

        context.lectures().expect_no_calls().await;
    }

    #[tokio::test]
    async fn test_blank_lecture_id_checked_before_body() {
        let context = RecorderTestContext::setup();

        OneShotBuilder::new(context.app(), route("%20%20"))
            .send_json(DeleteStudentFromLectureRequest { user_id: Uuid::new_v4().to_string() })
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing path parameter lecture_id$")
            .await;

        context.lectures().expect_no_calls().await;
    }

    #[tokio::test]
    async fn test_malformed_payload_does_not_reach_service() {
        let context = RecorderTestContext::setup();

        OneShotBuilder::new(context.app(), route(&Uuid::new_v4().to_string()))
            .send_text("")
            .await
            .expect_catalog_error(&DELETE_USER_FROM_LECTURE_HANDLER)
            .await;

        context.lectures().expect_no_calls().await;
    }

    test_payload_must_be_json!(
        TestContext::setup().await.into_app(),
        route("7c9e6679-7425-40de-944b-e07fc1f90ae7"),
        DELETE_USER_FROM_LECTURE_HANDLER
    );
}
