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

//! The `Password` and `HashedPassword` data types.

use campus_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default bcrypt cost used to hash passwords.
pub const DEFAULT_HASH_COST: u32 = 14;

/// An opaque type to hold a password, protecting it from leaking into logs.
#[derive(Clone, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    /// Creates a new password from a literal string.
    pub fn new<S: Into<String>>(s: S) -> Self {
        Password(s.into())
    }

    /// Returns a string view of the password.
    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hashes the password with bcrypt using `cost` rounds.  Consumes the password because there
    /// is no context in which keeping the password alive once we have generated its hash is
    /// correct.
    ///
    /// Passwords longer than what bcrypt can digest are rejected instead of silently truncated.
    pub fn hash(self, cost: u32) -> ModelResult<HashedPassword> {
        let hashed = bcrypt::non_truncating_hash(self.0, cost)
            .map_err(|e| ModelError(format!("Password error: {}", e)))?;
        Ok(HashedPassword::new(hashed))
    }

    /// Verifies if this password matches a given `hash`.
    pub fn verify(&self, hash: &HashedPassword) -> ModelResult<bool> {
        bcrypt::verify(&self.0, hash.as_str())
            .map_err(|e| ModelError(format!("Password error: {}", e)))
    }
}

impl From<&'static str> for Password {
    fn from(s: &'static str) -> Self {
        Password::new(s)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed password")
    }
}

/// An opaque type to hold a hashed password, protecting it from leaking into logs.
#[derive(Clone, PartialEq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Creates a new hashed password from a literal string.
    pub fn new<S: Into<String>>(s: S) -> Self {
        HashedPassword(s.into())
    }

    /// Returns a string view of the hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed hash")
    }
}
