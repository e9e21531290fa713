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

//! Entry point to the lectures service.

#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use campus_core::catalog::CatalogResult;
use campus_core::db::Db;
use campus_core::db::postgres::{PostgresDb, PostgresOptions};
use campus_lectures::catalog::{ENV_CONFIG_PARSE, INIT_SCHEMA, SETUP_DATABASE};
use campus_lectures::db::init_schema;
use campus_lectures::{ServeOptions, serve};
use log::{error, info};
use std::net::Ipv4Addr;
use std::process;
use std::sync::Arc;

/// Prefix of the environment variables that configure the service.
const ENV_PREFIX: &str = "CAMPUS";

/// Prefix of the environment variables that configure the database connection.
const DB_ENV_PREFIX: &str = "CAMPUS_SQL";

/// Loads the configuration, prepares the database and serves requests until failure.
async fn run() -> CatalogResult<()> {
    let opts = ServeOptions::from_env(ENV_PREFIX).map_err(|e| ENV_CONFIG_PARSE.append_message(e))?;
    let db_opts =
        PostgresOptions::from_env(DB_ENV_PREFIX).map_err(|e| ENV_CONFIG_PARSE.append_message(e))?;

    let db = PostgresDb::connect(db_opts).map_err(|e| SETUP_DATABASE.append_message(e))?;
    db.ping().await.map_err(|e| SETUP_DATABASE.append_message(e))?;
    info!("Connected to the database");

    let mut ex = db.ex().await.map_err(|e| INIT_SCHEMA.append_message(e))?;
    init_schema(&mut ex).await.map_err(|e| INIT_SCHEMA.append_message(e))?;
    drop(ex);

    serve((Ipv4Addr::UNSPECIFIED, opts.port), Arc::new(db), opts).await
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("CAMPUS_LOG_LEVEL", "info"))
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        process::exit(1);
    }
}
