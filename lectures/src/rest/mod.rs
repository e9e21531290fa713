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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use campus_core::rest::with_deadline;
use std::time::Duration;

mod lecture_add_student_put;
mod lecture_remove_student_delete;
mod lectures_get;
mod lectures_post;
#[cfg(test)]
mod testutils;
mod users_post;

/// Creates the router for the application.
///
/// Every request gets a deadline that expires `request_timeout` after it is received.
pub(crate) fn app(driver: Driver, request_timeout: Duration) -> Router {
    use axum::routing::{delete, get, post, put};
    Router::new()
        .route("/users", post(users_post::handler))
        .route("/lectures", get(lectures_get::handler).post(lectures_post::handler))
        .route("/lectures/:lecture_id/add-student", put(lecture_add_student_put::handler))
        .route(
            "/lectures/:lecture_id/remove-student",
            delete(lecture_remove_student_delete::handler),
        )
        .layer(axum::middleware::from_fn_with_state(request_timeout, with_deadline))
        .with_state(driver)
}
