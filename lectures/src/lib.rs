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

//! REST service to manage users, lectures and the students enrolled in them.

#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use campus_core::catalog::CatalogResult;
use campus_core::clocks::SystemClock;
use campus_core::db::Db;
use campus_core::env::get_optional_var;
use campus_core::env::get_required_var;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub mod catalog;
use catalog::SERVE;
pub mod db;
mod driver;
use driver::{Driver, LectureService, UserService};
mod mapping;
pub mod model;
use model::DEFAULT_HASH_COST;
pub mod repository;
use repository::{DbLectureRepository, DbUserRepository};
mod rest;
use rest::app;

/// Default amount of time a request can take before its storage operations are abandoned.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Options to configure the service.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ServeOptions {
    /// TCP port to listen on.
    pub port: u16,

    /// Amount of time each request can take.
    pub request_timeout: Duration,

    /// bcrypt cost with which to hash new passwords.
    pub password_cost: u32,
}

impl ServeOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_APP_PORT`, `<prefix>_REQUEST_TIMEOUT` (in
    /// seconds) and `<prefix>_PASSWORD_COST`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            port: get_required_var::<u16>(prefix, "APP_PORT")?,
            request_timeout: get_optional_var::<Duration>(prefix, "REQUEST_TIMEOUT")?
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            password_cost: get_optional_var::<u32>(prefix, "PASSWORD_COST")?
                .unwrap_or(DEFAULT_HASH_COST),
        })
    }
}

/// Instantiates all resources to serve the application on `bind_addr` backed by `db`.
///
/// `db` must have been initialized with `db::init_schema` beforehand.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
    opts: ServeOptions,
) -> CatalogResult<()> {
    let clock = Arc::new(SystemClock::default());
    let users = DbUserRepository::new(db.clone(), clock.clone());
    let lectures = DbLectureRepository::new(db, clock);
    let driver = Driver::new(
        UserService::new(Arc::new(users), opts.password_cost),
        LectureService::new(Arc::new(lectures)),
    );
    let app = app(driver, opts.request_timeout);

    let bind_addr = bind_addr.into();
    let listener =
        tokio::net::TcpListener::bind(bind_addr).await.map_err(|e| SERVE.append_message(e))?;
    info!("Listening on {}", bind_addr);
    axum::serve(listener, app).await.map_err(|e| SERVE.append_message(e))
}
