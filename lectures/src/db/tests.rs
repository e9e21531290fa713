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

//! Common tests for any database implementation.

use crate::db::*;
use campus_core::db::Db;
use std::sync::Arc;
use time::macros::datetime;

/// Shorthand for the database handle passed to every test.
type TestDb = Arc<dyn Db + Send + Sync>;

/// Syntactic sugar to create a user given only the local part of its email address.
async fn create_simple_user(ex: &mut Executor, name: &str, now: OffsetDateTime) -> User {
    let user = User::new(
        Uuid::new_v4(),
        format!("{}@example.com", name),
        name.to_owned(),
        "Doe".to_owned(),
        HashedPassword::new(format!("hash of {}", name)),
        "student".to_owned(),
    );
    create_user(ex, &user, now).await.unwrap();
    user
}

/// Syntactic sugar to create a lecture given only its title.
async fn create_simple_lecture(ex: &mut Executor, title: &str, now: OffsetDateTime) -> Lecture {
    let lecture = Lecture::new(
        Uuid::new_v4(),
        title.to_owned(),
        format!("All about {}", title),
        "Ada".to_owned(),
        "Room 101".to_owned(),
        90,
        datetime!(2024-12-25 08:00:00 UTC),
    );
    create_lecture(ex, &lecture, now).await.unwrap();
    lecture
}

async fn test_users_ok(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let user = create_simple_user(&mut ex, "jane", datetime!(2024-12-01 10:00:00 UTC)).await;
    assert_eq!(user, get_user(&mut ex, *user.id()).await.unwrap());
}

async fn test_users_not_found(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    create_simple_user(&mut ex, "jane", datetime!(2024-12-01 10:00:00 UTC)).await;
    assert_eq!(DbError::NotFound, get_user(&mut ex, Uuid::new_v4()).await.unwrap_err());
}

async fn test_users_duplicate_id(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let user = create_simple_user(&mut ex, "jane", datetime!(2024-12-01 10:00:00 UTC)).await;
    assert_eq!(
        DbError::AlreadyExists,
        create_user(&mut ex, &user, datetime!(2024-12-01 10:00:01 UTC)).await.unwrap_err()
    );
}

async fn test_lectures_ok(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let lecture = Lecture::new(
        Uuid::new_v4(),
        "Compilers".to_owned(),
        "Parsing".to_owned(),
        "Ada".to_owned(),
        "Room 101".to_owned(),
        60,
        datetime!(2024-12-25 10:30:00 +02:00),
    );
    create_lecture(&mut ex, &lecture, datetime!(2024-12-01 10:00:00 UTC)).await.unwrap();

    let stored = get_lecture(&mut ex, *lecture.id()).await.unwrap();
    assert_eq!(lecture.id(), stored.id());
    assert_eq!("Compilers", stored.title());
    assert_eq!("Parsing", stored.description());
    assert_eq!("Ada", stored.speaker());
    assert_eq!("Room 101", stored.location());
    assert_eq!(60, *stored.duration());
    assert_eq!(datetime!(2024-12-25 08:30:00 UTC), *stored.date());
    assert!(stored.students().is_empty());
}

async fn test_lectures_date_before_epoch(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let lecture = Lecture::new(
        Uuid::new_v4(),
        "History".to_owned(),
        "".to_owned(),
        "".to_owned(),
        "".to_owned(),
        0,
        datetime!(1969-07-20 20:17:00 UTC),
    );
    create_lecture(&mut ex, &lecture, datetime!(2024-12-01 10:00:00 UTC)).await.unwrap();
    assert_eq!(lecture, get_lecture(&mut ex, *lecture.id()).await.unwrap());
}

async fn test_lectures_duration_is_64_bit(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let lecture = Lecture::new(
        Uuid::new_v4(),
        "Marathon".to_owned(),
        "".to_owned(),
        "".to_owned(),
        "".to_owned(),
        i64::MAX,
        datetime!(2024-12-25 08:00:00 UTC),
    );
    create_lecture(&mut ex, &lecture, datetime!(2024-12-01 10:00:00 UTC)).await.unwrap();
    assert_eq!(i64::MAX, *get_lecture(&mut ex, *lecture.id()).await.unwrap().duration());
}

async fn test_lectures_not_found(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    assert_eq!(DbError::NotFound, get_lecture(&mut ex, Uuid::new_v4()).await.unwrap_err());
}

async fn test_lecture_students_add_and_remove(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let jane = create_simple_user(&mut ex, "jane", datetime!(2024-12-01 10:00:00 UTC)).await;
    let john = create_simple_user(&mut ex, "john", datetime!(2024-12-01 10:00:01 UTC)).await;
    let lecture = create_simple_lecture(&mut ex, "rust", datetime!(2024-12-01 10:00:02 UTC)).await;

    add_lecture_student(&mut ex, *lecture.id(), *john.id(), datetime!(2024-12-01 11:00:00 UTC))
        .await
        .unwrap();
    add_lecture_student(&mut ex, *lecture.id(), *jane.id(), datetime!(2024-12-01 11:00:01 UTC))
        .await
        .unwrap();
    assert_eq!(
        vec![john.clone(), jane.clone()],
        *get_lecture(&mut ex, *lecture.id()).await.unwrap().students()
    );

    remove_lecture_student(&mut ex, *lecture.id(), *john.id()).await.unwrap();
    assert_eq!(vec![jane], *get_lecture(&mut ex, *lecture.id()).await.unwrap().students());

    // Removing a student that is not enrolled is not an error.
    remove_lecture_student(&mut ex, *lecture.id(), *john.id()).await.unwrap();
}

async fn test_lecture_students_add_is_idempotent(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let jane = create_simple_user(&mut ex, "jane", datetime!(2024-12-01 10:00:00 UTC)).await;
    let lecture = create_simple_lecture(&mut ex, "rust", datetime!(2024-12-01 10:00:01 UTC)).await;

    for minute in 0..3 {
        let now = datetime!(2024-12-01 11:00:00 UTC) + time::Duration::minutes(minute);
        add_lecture_student(&mut ex, *lecture.id(), *jane.id(), now).await.unwrap();
    }
    assert_eq!(vec![jane], *get_lecture(&mut ex, *lecture.id()).await.unwrap().students());
}

async fn test_lecture_students_remove_is_scoped_to_lecture(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let jane = create_simple_user(&mut ex, "jane", datetime!(2024-12-01 10:00:00 UTC)).await;
    let rust = create_simple_lecture(&mut ex, "rust", datetime!(2024-12-01 10:00:01 UTC)).await;
    let sql = create_simple_lecture(&mut ex, "sql", datetime!(2024-12-01 10:00:02 UTC)).await;

    let now = datetime!(2024-12-01 11:00:00 UTC);
    add_lecture_student(&mut ex, *rust.id(), *jane.id(), now).await.unwrap();
    add_lecture_student(&mut ex, *sql.id(), *jane.id(), now).await.unwrap();

    remove_lecture_student(&mut ex, *rust.id(), *jane.id()).await.unwrap();
    assert!(get_lecture(&mut ex, *rust.id()).await.unwrap().students().is_empty());
    assert_eq!(vec![jane], *get_lecture(&mut ex, *sql.id()).await.unwrap().students());
}

async fn test_lecture_students_unknown_entities(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let jane = create_simple_user(&mut ex, "jane", datetime!(2024-12-01 10:00:00 UTC)).await;
    let lecture = create_simple_lecture(&mut ex, "rust", datetime!(2024-12-01 10:00:01 UTC)).await;

    let now = datetime!(2024-12-01 11:00:00 UTC);
    assert_eq!(
        DbError::NotFound,
        add_lecture_student(&mut ex, Uuid::new_v4(), *jane.id(), now).await.unwrap_err()
    );
    assert_eq!(
        DbError::NotFound,
        add_lecture_student(&mut ex, *lecture.id(), Uuid::new_v4(), now).await.unwrap_err()
    );
}

async fn test_touch_lecture(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let lecture = create_simple_lecture(&mut ex, "rust", datetime!(2024-12-01 10:00:00 UTC)).await;
    touch_lecture(&mut ex, *lecture.id(), datetime!(2024-12-02 10:00:00 UTC)).await.unwrap();
    assert_eq!(
        DbError::NotFound,
        touch_lecture(&mut ex, Uuid::new_v4(), datetime!(2024-12-02 10:00:00 UTC))
            .await
            .unwrap_err()
    );
}

async fn test_lectures_page_order_and_window(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let mut titles = vec![];
    for i in 0..5 {
        let now = datetime!(2024-12-01 10:00:00 UTC) + time::Duration::seconds(i);
        let title = format!("lecture {}", i);
        create_simple_lecture(&mut ex, &title, now).await;
        titles.push(title);
    }
    titles.reverse();

    let page_titles = |lectures: Vec<Lecture>| {
        lectures.into_iter().map(|l| l.title().clone()).collect::<Vec<String>>()
    };

    let page = get_lectures_page(&mut ex, Pagination::new(1, 2).unwrap()).await.unwrap();
    assert_eq!(titles[0..2], page_titles(page));

    let page = get_lectures_page(&mut ex, Pagination::new(2, 2).unwrap()).await.unwrap();
    assert_eq!(titles[2..4], page_titles(page));

    let page = get_lectures_page(&mut ex, Pagination::new(3, 2).unwrap()).await.unwrap();
    assert_eq!(titles[4..5], page_titles(page));

    let page = get_lectures_page(&mut ex, Pagination::new(1, 10).unwrap()).await.unwrap();
    assert_eq!(titles, page_titles(page));
}

async fn test_lectures_page_out_of_range(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    create_simple_lecture(&mut ex, "rust", datetime!(2024-12-01 10:00:00 UTC)).await;
    let page = get_lectures_page(&mut ex, Pagination::new(5, 10).unwrap()).await.unwrap();
    assert!(page.is_empty());
}

async fn test_lectures_page_empty(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let page = get_lectures_page(&mut ex, Pagination::new(1, 10).unwrap()).await.unwrap();
    assert!(page.is_empty());
}

async fn test_lectures_page_loads_rosters(db: TestDb) {
    let mut ex = db.ex().await.unwrap();

    let jane = create_simple_user(&mut ex, "jane", datetime!(2024-12-01 10:00:00 UTC)).await;
    let john = create_simple_user(&mut ex, "john", datetime!(2024-12-01 10:00:01 UTC)).await;
    let rust = create_simple_lecture(&mut ex, "rust", datetime!(2024-12-01 10:00:02 UTC)).await;
    let sql = create_simple_lecture(&mut ex, "sql", datetime!(2024-12-01 10:00:03 UTC)).await;
    let empty = create_simple_lecture(&mut ex, "empty", datetime!(2024-12-01 10:00:04 UTC)).await;

    add_lecture_student(&mut ex, *rust.id(), *jane.id(), datetime!(2024-12-01 11:00:00 UTC))
        .await
        .unwrap();
    add_lecture_student(&mut ex, *rust.id(), *john.id(), datetime!(2024-12-01 11:00:01 UTC))
        .await
        .unwrap();
    add_lecture_student(&mut ex, *sql.id(), *john.id(), datetime!(2024-12-01 11:00:02 UTC))
        .await
        .unwrap();

    let page = get_lectures_page(&mut ex, Pagination::new(1, 10).unwrap()).await.unwrap();
    assert_eq!(
        vec![
            empty,
            sql.with_students(vec![john.clone()]),
            rust.with_students(vec![jane, john]),
        ],
        page
    );
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        campus_core::db::testutils::generate_tests!(
            $(#[$extra],)?
            $setup,
            $crate::db::tests,
            test_users_ok,
            test_users_not_found,
            test_users_duplicate_id,
            test_lectures_ok,
            test_lectures_date_before_epoch,
            test_lectures_duration_is_64_bit,
            test_lectures_not_found,
            test_lecture_students_add_and_remove,
            test_lecture_students_add_is_idempotent,
            test_lecture_students_remove_is_scoped_to_lecture,
            test_lecture_students_unknown_entities,
            test_touch_lecture,
            test_lectures_page_order_and_window,
            test_lectures_page_out_of_range,
            test_lectures_page_empty,
            test_lectures_page_loads_rosters
        );
    }
];

use generate_db_tests;

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use crate::db::init_schema;
    use campus_core::db::postgres::PostgresDb;

    async fn setup() -> PostgresDb {
        let db = campus_core::db::postgres::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(
        Arc::new(setup().await),
        #[ignore = "Requires environment configuration and is expensive"]
    );
}

mod sqlite {
    use super::*;
    use crate::db::init_schema;
    use campus_core::db::sqlite::SqliteDb;

    async fn setup() -> SqliteDb {
        let db = campus_core::db::sqlite::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(Arc::new(setup().await));
}
