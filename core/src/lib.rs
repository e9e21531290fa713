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

//! Rudimentary framework to build web services.
//!
//! Services built using this framework adhere to the following layered architecture, and they
//! should structure their code to have these modules as well:
//!
//! 1.  `model`: This is the base layer, providing high-level data types that represent concepts in
//!     the domain of the application.  There should be no logic in here.  Extensive use of the
//!     newtype and builder patterns is strongly encouraged.
//!
//! 1.  `db`: This is the persistence layer.  Services provide free functions that take an
//!     `Executor` and issue the queries for every supported database backend.
//!
//! 1.  `repository`: This is the storage contract seen by the business logic.  Services define
//!     traits for the operations they need and implement them on top of `db`, bounding every
//!     operation by the request's `Deadline`.
//!
//! 1.  `driver`: This is the business logic layer.  Services provide their own types to validate
//!     input and coordinate calls into the repositories.
//!
//! 1.  `rest`: This is the HTTP layer, offering the REST APIs.  Services should provide their own
//!     `axum::Router` implementation and back every API with the driver.
//!
//! 1.  `main`: This is the app launcher.  It sole purpose is to gather configuration data from
//!     environment variables and call the `crate::serve` function to start the application.
//!
//! Errors that must reach users are `CatalogError`s, declared once per service as constants and
//! derived with extra context as they float to the top of the app.  The REST layer turns them into
//! responses carrying the status recorded in the catalog.
//!
//! This crate does not have any heavy dependencies except those that are required for all services.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod catalog;
pub mod clocks;
pub mod db;
pub mod deadline;
pub mod env;
pub mod model;
pub mod rest;
