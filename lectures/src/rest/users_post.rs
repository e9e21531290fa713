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

//! API to create a new user.

use crate::catalog::CREATE_USER_HANDLER;
use crate::driver::Driver;
use crate::model::requests::CreateUserRequest;
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
    let request = decode_json::<CreateUserRequest>(&body, &CREATE_USER_HANDLER)
        .inspect_err(|e| warn!("{}", e))?;
    let response = driver.users().create_user(deadline, request).await?;
    Ok((http::StatusCode::CREATED, Json(response)))
}
