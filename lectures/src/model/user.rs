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

//! The `User` data type.

use crate::model::{HashedPassword, Password};
use campus_core::model::ModelResult;
use derive_getters::Getters;
use uuid::Uuid;

/// Representation of a user of the service.
///
/// The password type tracks whether the credentials have been hashed yet: only `User` values
/// carrying a `HashedPassword`, which is the default, can reach the storage layer.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct User<P = HashedPassword> {
    /// Unique identifier of the user.
    id: Uuid,

    /// Email address of the user.
    email: String,

    /// First name of the user.
    first_name: String,

    /// Last name of the user.
    last_name: String,

    /// Credentials of the user.
    password: P,

    /// Free-form role of the user, such as "student".
    role: String,
}

impl<P> User<P> {
    /// Creates a new user with the given fields.
    pub fn new(
        id: Uuid,
        email: String,
        first_name: String,
        last_name: String,
        password: P,
        role: String,
    ) -> Self {
        Self { id, email, first_name, last_name, password, role }
    }
}

impl User<Password> {
    /// Replaces the plaintext password with its bcrypt hash computed with `cost` rounds.
    pub fn hash_password(self, cost: u32) -> ModelResult<User<HashedPassword>> {
        let password = self.password.hash(cost)?;
        Ok(User {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password,
            role: self.role,
        })
    }
}
