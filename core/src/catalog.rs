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

//! Catalog of named errors shared by all layers of a service.
//!
//! Services declare their catalog as a collection of `const` items of type `CatalogError`.  Each
//! entry is an immutable triple of a stable machine-readable code, a human-readable message, and
//! the HTTP status that the error maps to once it reaches the REST layer.
//!
//! Layers classify failures by deriving new values from the catalog entries with
//! `CatalogError::append_message`, which never modifies the entry itself.  Two errors are of the
//! same kind when their codes match, regardless of their messages or statuses.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// A classified error with a stable code, a message and the HTTP status it maps to.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct CatalogError {
    /// Stable machine-readable code.  Several entries may share the same code.
    code: &'static str,

    /// Human-readable message, possibly extended with context.
    message: Cow<'static, str>,

    /// HTTP status to return when this error terminates a request.
    status: StatusCode,
}

impl CatalogError {
    /// Creates a new catalog entry.  Meant to be used to declare `const` items.
    pub const fn new(code: &'static str, message: &'static str, status: StatusCode) -> Self {
        Self { code, message: Cow::Borrowed(message), status }
    }

    /// Returns the stable code of the error.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Returns the message of the error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the HTTP status of the error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Derives a new error of the same kind and status whose message carries `context`.
    pub fn append_message<C: fmt::Display>(&self, context: C) -> Self {
        Self {
            code: self.code,
            message: Cow::Owned(format!("{} : {}", self.message, context)),
            status: self.status,
        }
    }

    /// Returns true if this error has the same code as `entry`.
    pub fn is_same_kind(&self, entry: &CatalogError) -> bool {
        self.code == entry.code
    }
}

/// Returns true if `err` is a `CatalogError` with the same code as `entry`.
///
/// Errors of any other type are never of the same kind as a catalog entry.
pub fn is_same_kind(err: &(dyn Error + 'static), entry: &CatalogError) -> bool {
    err.downcast_ref::<CatalogError>().is_some_and(|err| err.is_same_kind(entry))
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        (self.status, Json(self.message.into_owned())).into_response()
    }
}

/// Result type for operations that fail with catalog errors.
pub type CatalogResult<T> = Result<T, CatalogError>;
