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

//! API to list lectures and their rosters one page at a time.

use crate::catalog::GET_LECTURES_PP_HANDLER;
use crate::driver::Driver;
use crate::model::requests::GetLecturesPageRequest;
use crate::model::responses::LectureSummary;
use axum::Json;
use axum::extract::{Extension, RawQuery, State};
use bytes::Bytes;
use campus_core::catalog::CatalogResult;
use campus_core::deadline::Deadline;
use campus_core::rest::decode_json;
use log::warn;

/// Extracts the page request from the JSON `body` if there is one, or else from the `query`.
fn page_request(body: &[u8], query: Option<&str>) -> CatalogResult<GetLecturesPageRequest> {
    if !body.is_empty() {
        return decode_json(body, &GET_LECTURES_PP_HANDLER);
    }
    serde_urlencoded::from_str(query.unwrap_or_default())
        .map_err(|e| GET_LECTURES_PP_HANDLER.append_message(format!("QUERY ERR: {}", e)))
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(deadline): Extension<Deadline>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> CatalogResult<Json<Vec<LectureSummary>>> {
    let request = page_request(&body, query.as_deref()).inspect_err(|e| warn!("{}", e))?;
    let lectures = driver
        .lectures()
        .get_lectures_and_students_pp(deadline, &request.page, &request.per_page)
        .await?;
    Ok(Json(lectures))
}
