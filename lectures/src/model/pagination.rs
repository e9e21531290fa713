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

//! The `Pagination` data type.

use campus_core::model::{ModelError, ModelResult};

/// Window over a collection sorted by the storage layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    /// Number of entries to skip.
    offset: i64,

    /// Maximum number of entries to return.
    limit: i64,
}

impl Pagination {
    /// Computes the window for the 1-based `page` when pages hold `per_page` entries.
    pub fn new(page: i64, per_page: i64) -> ModelResult<Self> {
        if page < 1 {
            return Err(ModelError(format!("Page must be at least 1 but got {}", page)));
        }
        if per_page < 1 {
            return Err(ModelError(format!("Page size must be at least 1 but got {}", per_page)));
        }
        let offset = (page - 1)
            .checked_mul(per_page)
            .ok_or_else(|| ModelError(format!("Page {} of size {} is too far", page, per_page)))?;
        Ok(Self { offset, limit: per_page })
    }

    /// Returns the number of entries to skip.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Returns the maximum number of entries to return.
    pub fn limit(&self) -> i64 {
        self.limit
    }
}
