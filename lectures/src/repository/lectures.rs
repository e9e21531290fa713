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

//! Database-backed storage of lectures and their rosters.

use crate::catalog::{
    ADD_STUDENT_TO_LECTURE_REPO, CREATE_LECTURE_REPO, DROP_USER_FROM_LECTURE_REPO,
    GET_LECTURES_STUDENTS_PP_REPO,
};
use crate::db;
use crate::model::{Lecture, Pagination};
use crate::repository::LectureRepository;
use async_trait::async_trait;
use campus_core::catalog::CatalogResult;
use campus_core::clocks::Clock;
use campus_core::db::Db;
use campus_core::deadline::Deadline;
use log::warn;
use std::sync::Arc;
use uuid::Uuid;

/// Lecture repository backed by the database.
#[derive(Clone)]
pub struct DbLectureRepository {
    /// The database that holds the lectures and their rosters.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock from which to obtain audit timestamps.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl DbLectureRepository {
    /// Creates a new repository backed by the given injected components.
    pub fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}

#[async_trait]
impl LectureRepository for DbLectureRepository {
    async fn create_lecture(&self, deadline: Deadline, lecture: Lecture) -> CatalogResult<String> {
        let now = self.clock.now_utc();
        let stored = deadline
            .run(async {
                let mut ex = self.db.ex().await?;
                db::create_lecture(&mut ex, &lecture, now).await?;
                db::get_lecture(&mut ex, *lecture.id()).await
            })
            .await
            .map_err(|e| {
                warn!("Cannot store lecture {}: {}", lecture.id(), e);
                CREATE_LECTURE_REPO.append_message(e)
            })?;
        Ok(stored.id().to_string())
    }

    async fn add_user_to_lecture(
        &self,
        deadline: Deadline,
        lecture_id: Uuid,
        user_id: Uuid,
    ) -> CatalogResult<()> {
        let now = self.clock.now_utc();
        deadline
            .run(async {
                let mut tx = self.db.begin().await?;
                db::get_user(tx.ex(), user_id).await?;
                db::get_lecture(tx.ex(), lecture_id).await?;
                db::add_lecture_student(tx.ex(), lecture_id, user_id, now).await?;
                db::touch_lecture(tx.ex(), lecture_id, now).await?;
                tx.commit().await
            })
            .await
            .map_err(|e| {
                warn!("Cannot add user {} to lecture {}: {}", user_id, lecture_id, e);
                ADD_STUDENT_TO_LECTURE_REPO.append_message(e)
            })
    }

    async fn drop_user_from_lecture(
        &self,
        deadline: Deadline,
        lecture_id: Uuid,
        user_id: Uuid,
    ) -> CatalogResult<()> {
        let now = self.clock.now_utc();
        deadline
            .run(async {
                let mut tx = self.db.begin().await?;
                db::get_user(tx.ex(), user_id).await?;
                db::get_lecture(tx.ex(), lecture_id).await?;
                db::remove_lecture_student(tx.ex(), lecture_id, user_id).await?;
                db::touch_lecture(tx.ex(), lecture_id, now).await?;
                tx.commit().await
            })
            .await
            .map_err(|e| {
                warn!("Cannot drop user {} from lecture {}: {}", user_id, lecture_id, e);
                DROP_USER_FROM_LECTURE_REPO.append_message(e)
            })
    }

    async fn get_lectures_and_students_pp(
        &self,
        deadline: Deadline,
        pagination: Pagination,
    ) -> CatalogResult<Vec<Lecture>> {
        deadline
            .run(async {
                let mut ex = self.db.ex().await?;
                db::get_lectures_page(&mut ex, pagination).await
            })
            .await
            .map_err(|e| {
                warn!("Cannot list lectures for {:?}: {}", pagination, e);
                GET_LECTURES_STUDENTS_PP_REPO.append_message(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HashedPassword, User};
    use campus_core::catalog::is_same_kind;
    use campus_core::clocks::testutils::MonotonicClock;
    use http::StatusCode;
    use std::time::Duration;
    use time::macros::datetime;

    struct TestContext {
        db: Arc<dyn Db + Send + Sync>,
        repo: DbLectureRepository,
    }

    impl TestContext {
        async fn setup() -> Self {
            let db: Arc<dyn Db + Send + Sync> =
                Arc::new(campus_core::db::sqlite::testutils::setup().await);
            db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
            let clock = Arc::new(MonotonicClock::new(datetime!(2024-12-01 10:00:00 UTC)));
            let repo = DbLectureRepository::new(db.clone(), clock);
            Self { db, repo }
        }

        fn deadline(&self) -> Deadline {
            Deadline::after(Duration::from_secs(60))
        }

        async fn create_user(&self, name: &str) -> User {
            let user = User::new(
                Uuid::new_v4(),
                format!("{}@example.com", name),
                name.to_owned(),
                "Doe".to_owned(),
                HashedPassword::new("hash"),
                "student".to_owned(),
            );
            let now = datetime!(2024-11-01 00:00:00 UTC);
            db::create_user(&mut self.db.ex().await.unwrap(), &user, now).await.unwrap();
            user
        }

        async fn create_lecture(&self, title: &str) -> Lecture {
            let lecture = Lecture::new(
                Uuid::new_v4(),
                title.to_owned(),
                "".to_owned(),
                "Ada".to_owned(),
                "Room 101".to_owned(),
                60,
                datetime!(2024-12-25 08:00:00 UTC),
            );
            self.repo.create_lecture(self.deadline(), lecture.clone()).await.unwrap();
            lecture
        }

        async fn roster(&self, lecture: &Lecture) -> Vec<User> {
            db::get_lecture(&mut self.db.ex().await.unwrap(), *lecture.id())
                .await
                .unwrap()
                .students()
                .clone()
        }
    }

    #[tokio::test]
    async fn test_create_lecture_ok() {
        let context = TestContext::setup().await;

        let lecture = Lecture::new(
            Uuid::new_v4(),
            "Compilers".to_owned(),
            "Parsing".to_owned(),
            "Ada".to_owned(),
            "Room 101".to_owned(),
            60,
            datetime!(2024-12-25 08:00:00 UTC),
        );
        let id = context.repo.create_lecture(context.deadline(), lecture.clone()).await.unwrap();
        assert_eq!(lecture.id().to_string(), id);

        assert_eq!(
            lecture,
            db::get_lecture(&mut context.db.ex().await.unwrap(), *lecture.id()).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_add_user_to_lecture_ok_and_idempotent() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;
        let lecture = context.create_lecture("rust").await;

        for _ in 0..2 {
            context
                .repo
                .add_user_to_lecture(context.deadline(), *lecture.id(), *jane.id())
                .await
                .unwrap();
        }
        assert_eq!(vec![jane], context.roster(&lecture).await);
    }

    #[tokio::test]
    async fn test_add_user_to_lecture_unknown_user() {
        let context = TestContext::setup().await;
        let lecture = context.create_lecture("rust").await;

        let err = context
            .repo
            .add_user_to_lecture(context.deadline(), *lecture.id(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(is_same_kind(&err, &ADD_STUDENT_TO_LECTURE_REPO));
        assert_eq!(StatusCode::NOT_FOUND, err.status());
        assert_eq!("Failed to AddStudentToLectureErr : Entity not found", err.message());
        assert!(context.roster(&lecture).await.is_empty());
    }

    #[tokio::test]
    async fn test_add_user_to_lecture_unknown_lecture() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;

        let err = context
            .repo
            .add_user_to_lecture(context.deadline(), Uuid::new_v4(), *jane.id())
            .await
            .unwrap_err();
        assert!(is_same_kind(&err, &ADD_STUDENT_TO_LECTURE_REPO));
        assert_eq!("Failed to AddStudentToLectureErr : Entity not found", err.message());
    }

    #[tokio::test]
    async fn test_drop_user_from_lecture_keeps_other_lectures() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;
        let john = context.create_user("john").await;
        let rust = context.create_lecture("rust").await;
        let sql = context.create_lecture("sql").await;

        for lecture in [&rust, &sql] {
            for user in [&jane, &john] {
                context
                    .repo
                    .add_user_to_lecture(context.deadline(), *lecture.id(), *user.id())
                    .await
                    .unwrap();
            }
        }

        context
            .repo
            .drop_user_from_lecture(context.deadline(), *rust.id(), *jane.id())
            .await
            .unwrap();

        assert_eq!(vec![john.clone()], context.roster(&rust).await);
        assert_eq!(vec![jane, john], context.roster(&sql).await);
    }

    #[tokio::test]
    async fn test_drop_user_from_lecture_not_enrolled() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;
        let lecture = context.create_lecture("rust").await;

        context
            .repo
            .drop_user_from_lecture(context.deadline(), *lecture.id(), *jane.id())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_drop_user_from_lecture_unknown_entities() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;
        let lecture = context.create_lecture("rust").await;

        for (lecture_id, user_id) in [(*lecture.id(), Uuid::new_v4()), (Uuid::new_v4(), *jane.id())]
        {
            let err = context
                .repo
                .drop_user_from_lecture(context.deadline(), lecture_id, user_id)
                .await
                .unwrap_err();
            assert!(is_same_kind(&err, &DROP_USER_FROM_LECTURE_REPO));
            assert_eq!(StatusCode::NOT_FOUND, err.status());
        }
    }

    #[tokio::test]
    async fn test_get_lectures_and_students_pp() {
        let context = TestContext::setup().await;
        let jane = context.create_user("jane").await;
        let first = context.create_lecture("first").await;
        let second = context.create_lecture("second").await;
        let third = context.create_lecture("third").await;

        context
            .repo
            .add_user_to_lecture(context.deadline(), *second.id(), *jane.id())
            .await
            .unwrap();

        let page = context
            .repo
            .get_lectures_and_students_pp(context.deadline(), Pagination::new(1, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(vec![third, second.with_students(vec![jane])], page);

        let page = context
            .repo
            .get_lectures_and_students_pp(context.deadline(), Pagination::new(2, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(vec![first], page);

        let page = context
            .repo
            .get_lectures_and_students_pp(context.deadline(), Pagination::new(3, 2).unwrap())
            .await
            .unwrap();
        assert!(page.is_empty());
    }
}
