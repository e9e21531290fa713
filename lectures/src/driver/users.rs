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

//! Operations on users.

use crate::catalog::CREATE_USER_SERVICE;
use crate::mapping;
use crate::model::requests::CreateUserRequest;
use crate::model::responses::CreateUserResponse;
use crate::repository::UserRepository;
use campus_core::catalog::CatalogResult;
use campus_core::deadline::Deadline;
use log::{info, warn};
use std::sync::Arc;

/// Business logic for users.
#[derive(Clone)]
pub struct UserService {
    /// Storage of users.
    users: Arc<dyn UserRepository + Send + Sync>,

    /// bcrypt cost with which to hash new passwords.
    hash_cost: u32,
}

impl UserService {
    /// Creates a new service that stores users in `users` and hashes passwords with `hash_cost`.
    pub fn new(users: Arc<dyn UserRepository + Send + Sync>, hash_cost: u32) -> Self {
        Self { users, hash_cost }
    }

    /// Creates a new user as described by `request` and returns its identifier.
    ///
    /// The password is hashed before it reaches storage.  Passwords that bcrypt cannot digest in
    /// full are rejected.
    pub async fn create_user(
        &self,
        deadline: Deadline,
        request: CreateUserRequest,
    ) -> CatalogResult<CreateUserResponse> {
        let user = mapping::to_user(request).hash_password(self.hash_cost).map_err(|e| {
            warn!("Cannot hash password of new user: {}", e);
            CREATE_USER_SERVICE.append_message(e)
        })?;
        let user_id = self.users.create_user(deadline, user).await?;
        info!("Created user {}", user_id);
        Ok(CreateUserResponse::new(user_id))
    }
}
