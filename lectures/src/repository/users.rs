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

//! Database-backed storage of users.

use crate::catalog::CREATE_USER_REPO;
use crate::db;
use crate::model::User;
use crate::repository::UserRepository;
use async_trait::async_trait;
use campus_core::catalog::CatalogResult;
use campus_core::clocks::Clock;
use campus_core::db::Db;
use campus_core::deadline::Deadline;
use log::warn;
use std::sync::Arc;

/// User repository backed by the database.
#[derive(Clone)]
pub struct DbUserRepository {
    /// The database that holds the users.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock from which to obtain audit timestamps.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl DbUserRepository {
    /// Creates a new repository backed by the given injected components.
    pub fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}

#[async_trait]
impl UserRepository for DbUserRepository {
    async fn create_user(&self, deadline: Deadline, user: User) -> CatalogResult<String> {
        let now = self.clock.now_utc();
        let stored = deadline
            .run(async {
                let mut ex = self.db.ex().await?;
                db::create_user(&mut ex, &user, now).await?;
                db::get_user(&mut ex, *user.id()).await
            })
            .await
            .map_err(|e| {
                warn!("Cannot store user {}: {}", user.id(), e);
                CREATE_USER_REPO.append_message(e)
            })?;
        Ok(stored.id().to_string())
    }
}
