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

//! Database abstraction to manipulate users, lectures and their rosters.
//!
//! Rows with a non-null `deleted_at` are invisible to every read in this module.

use crate::model::{HashedPassword, Lecture, Pagination, User};
#[cfg(feature = "postgres")]
use campus_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use campus_core::db::sqlite::{self, build_timestamp, unpack_timestamp};
use campus_core::db::{DbError, DbResult, Executor, ensure_one_upsert};
use futures::TryStreamExt;
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use std::collections::HashMap;
use time::OffsetDateTime;
#[cfg(any(feature = "sqlite", test))]
use time::{UtcOffset, format_description::well_known::Rfc3339};
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Parses a textual UUID as stored in SQLite.
#[cfg(any(feature = "sqlite", test))]
fn parse_uuid(raw: &str) -> DbResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| DbError::DataIntegrityError(format!("Invalid UUID '{}': {}", raw, e)))
}

/// Checks that an insertion created exactly one row.
fn ensure_one_insert(rows_affected: u64) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::BackendError("No rows affected by insertion".to_owned())),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Insertion affected more than one row".to_owned())),
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: Uuid = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let first_name: String = row.try_get("first_name").map_err(postgres::map_sqlx_error)?;
        let last_name: String = row.try_get("last_name").map_err(postgres::map_sqlx_error)?;
        let password: String = row.try_get("password").map_err(postgres::map_sqlx_error)?;
        let role: String = row.try_get("role").map_err(postgres::map_sqlx_error)?;

        Ok(User::new(id, email, first_name, last_name, HashedPassword::new(password), role))
    }
}

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Lecture {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: Uuid = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let speaker: String = row.try_get("speaker").map_err(postgres::map_sqlx_error)?;
        let location: String = row.try_get("location").map_err(postgres::map_sqlx_error)?;
        let duration: i64 = row.try_get("duration").map_err(postgres::map_sqlx_error)?;
        let date: OffsetDateTime = row.try_get("date").map_err(postgres::map_sqlx_error)?;

        Ok(Lecture::new(id, title, description, speaker, location, duration, date))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let first_name: String = row.try_get("first_name").map_err(sqlite::map_sqlx_error)?;
        let last_name: String = row.try_get("last_name").map_err(sqlite::map_sqlx_error)?;
        let password: String = row.try_get("password").map_err(sqlite::map_sqlx_error)?;
        let role: String = row.try_get("role").map_err(sqlite::map_sqlx_error)?;

        let id = parse_uuid(&id)?;

        Ok(User::new(id, email, first_name, last_name, HashedPassword::new(password), role))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Lecture {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let speaker: String = row.try_get("speaker").map_err(sqlite::map_sqlx_error)?;
        let location: String = row.try_get("location").map_err(sqlite::map_sqlx_error)?;
        let duration: i64 = row.try_get("duration").map_err(sqlite::map_sqlx_error)?;
        let date: String = row.try_get("date").map_err(sqlite::map_sqlx_error)?;

        let id = parse_uuid(&id)?;
        let date = OffsetDateTime::parse(&date, &Rfc3339).map_err(|e| {
            DbError::DataIntegrityError(format!("Invalid lecture date '{}': {}", date, e))
        })?;

        Ok(Lecture::new(id, title, description, speaker, location, duration, date))
    }
}

/// Formats a lecture date for storage in SQLite.
#[cfg(any(feature = "sqlite", test))]
fn format_date(date: OffsetDateTime) -> DbResult<String> {
    date.to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| DbError::DataIntegrityError(format!("Cannot store date {}: {}", date, e)))
}

/// Creates a new `user` whose creation time is `now`.
pub async fn create_user(ex: &mut Executor, user: &User, now: OffsetDateTime) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO users
                    (id, email, first_name, last_name, password, role, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            ";
            let done = sqlx::query(query_str)
                .bind(user.id())
                .bind(user.email())
                .bind(user.first_name())
                .bind(user.last_name())
                .bind(user.password().as_str())
                .bind(user.role())
                .bind(now)
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now);

            let query_str = "
                INSERT INTO users (
                    id, email, first_name, last_name, password, role,
                    created_at_secs, created_at_nsecs, updated_at_secs, updated_at_nsecs
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(user.id().to_string())
                .bind(user.email())
                .bind(user.first_name())
                .bind(user.last_name())
                .bind(user.password().as_str())
                .bind(user.role())
                .bind(now_secs)
                .bind(now_nsecs)
                .bind(now_secs)
                .bind(now_nsecs)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    ensure_one_insert(rows_affected)
}

/// Gets an existing user by its `id`.
pub async fn get_user(ex: &mut Executor, id: Uuid) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM users WHERE id = $1 AND deleted_at IS NULL";
            let raw_user = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM users WHERE id = ? AND deleted_at_secs IS NULL";
            let raw_user = sqlx::query(query_str)
                .bind(id.to_string())
                .fetch_one(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Creates a new `lecture` whose creation time is `now`.
///
/// The roster of `lecture` is ignored: students are enrolled with `add_lecture_student`.
pub async fn create_lecture(
    ex: &mut Executor,
    lecture: &Lecture,
    now: OffsetDateTime,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO lectures (
                    id, title, description, speaker, location, duration, date,
                    created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ";
            let done = sqlx::query(query_str)
                .bind(lecture.id())
                .bind(lecture.title())
                .bind(lecture.description())
                .bind(lecture.speaker())
                .bind(lecture.location())
                .bind(lecture.duration())
                .bind(lecture.date())
                .bind(now)
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let date = format_date(*lecture.date())?;
            let (now_secs, now_nsecs) = unpack_timestamp(now);

            let query_str = "
                INSERT INTO lectures (
                    id, title, description, speaker, location, duration, date,
                    created_at_secs, created_at_nsecs, updated_at_secs, updated_at_nsecs
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(lecture.id().to_string())
                .bind(lecture.title())
                .bind(lecture.description())
                .bind(lecture.speaker())
                .bind(lecture.location())
                .bind(lecture.duration())
                .bind(date)
                .bind(now_secs)
                .bind(now_nsecs)
                .bind(now_secs)
                .bind(now_nsecs)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    ensure_one_insert(rows_affected)
}

/// Gets the students enrolled in the lecture `id`, in enrollment order.
async fn get_lecture_students(ex: &mut Executor, id: Uuid) -> DbResult<Vec<User>> {
    let mut students = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT u.* FROM lecture_students ls
                JOIN users u ON u.id = ls.user_id
                WHERE ls.lecture_id = $1 AND u.deleted_at IS NULL
                ORDER BY ls.created_at, u.id
            ";
            let mut rows = sqlx::query(query_str).bind(id).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                students.push(User::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT u.* FROM lecture_students ls
                JOIN users u ON u.id = ls.user_id
                WHERE ls.lecture_id = ? AND u.deleted_at_secs IS NULL
                ORDER BY ls.created_at_secs, ls.created_at_nsecs, u.id
            ";
            let mut rows = sqlx::query(query_str).bind(id.to_string()).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                students.push(User::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(students)
}

/// Gets an existing lecture by its `id`, including its roster.
pub async fn get_lecture(ex: &mut Executor, id: Uuid) -> DbResult<Lecture> {
    let lecture = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM lectures WHERE id = $1 AND deleted_at IS NULL";
            let raw_lecture = sqlx::query(query_str)
                .bind(id)
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Lecture::try_from(raw_lecture)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM lectures WHERE id = ? AND deleted_at_secs IS NULL";
            let raw_lecture = sqlx::query(query_str)
                .bind(id.to_string())
                .fetch_one(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Lecture::try_from(raw_lecture)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    let students = get_lecture_students(ex, id).await?;
    Ok(lecture.with_students(students))
}

/// Enrolls `user_id` in `lecture_id` at time `now`.  Enrolling an already-enrolled user is a
/// no-op.
pub async fn add_lecture_student(
    ex: &mut Executor,
    lecture_id: Uuid,
    user_id: Uuid,
    now: OffsetDateTime,
) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO lecture_students (lecture_id, user_id, created_at)
                VALUES ($1, $2, $3)
                ON CONFLICT DO NOTHING
            ";
            sqlx::query(query_str)
                .bind(lecture_id)
                .bind(user_id)
                .bind(now)
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now);

            let query_str = "
                INSERT INTO lecture_students (lecture_id, user_id, created_at_secs, created_at_nsecs)
                VALUES (?, ?, ?, ?)
                ON CONFLICT DO NOTHING
            ";
            sqlx::query(query_str)
                .bind(lecture_id.to_string())
                .bind(user_id.to_string())
                .bind(now_secs)
                .bind(now_nsecs)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(())
}

/// Removes `user_id` from the roster of `lecture_id`, leaving any other enrollments of the user
/// untouched.  Removing a user that is not enrolled is a no-op.
pub async fn remove_lecture_student(
    ex: &mut Executor,
    lecture_id: Uuid,
    user_id: Uuid,
) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM lecture_students WHERE lecture_id = $1 AND user_id = $2";
            sqlx::query(query_str)
                .bind(lecture_id)
                .bind(user_id)
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM lecture_students WHERE lecture_id = ? AND user_id = ?";
            sqlx::query(query_str)
                .bind(lecture_id.to_string())
                .bind(user_id.to_string())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(())
}

/// Records that the lecture `id` was modified at `now`.
pub async fn touch_lecture(ex: &mut Executor, id: Uuid, now: OffsetDateTime) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "UPDATE lectures SET updated_at = $1 WHERE id = $2 AND deleted_at IS NULL";
            let done = sqlx::query(query_str)
                .bind(now)
                .bind(id)
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now);

            let query_str = "
                UPDATE lectures SET updated_at_secs = ?, updated_at_nsecs = ?
                WHERE id = ? AND deleted_at_secs IS NULL
            ";
            let done = sqlx::query(query_str)
                .bind(now_secs)
                .bind(now_nsecs)
                .bind(id.to_string())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    ensure_one_upsert(rows_affected)
}

/// Gets the window of lectures described by `pagination`, newest first, with their rosters.
///
/// Lectures created at the same time are ordered by descending identifier.
pub async fn get_lectures_page(
    ex: &mut Executor,
    pagination: Pagination,
) -> DbResult<Vec<Lecture>> {
    let mut lectures = vec![];
    let mut rosters: HashMap<Uuid, Vec<User>> = HashMap::default();
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM lectures
                WHERE deleted_at IS NULL
                ORDER BY created_at DESC, id DESC
                LIMIT $1 OFFSET $2
            ";
            let mut rows = sqlx::query(query_str)
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch(&mut *ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                lectures.push(Lecture::try_from(row)?);
            }
            drop(rows);

            let query_str = "
                SELECT ls.lecture_id AS roster_lecture_id, u.* FROM lecture_students ls
                JOIN users u ON u.id = ls.user_id
                WHERE u.deleted_at IS NULL AND ls.lecture_id = ANY($1)
                ORDER BY ls.created_at, u.id
            ";
            let ids = lectures.iter().map(|l| *l.id()).collect::<Vec<Uuid>>();
            let mut rows = sqlx::query(query_str).bind(ids).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                let lecture_id: Uuid =
                    row.try_get("roster_lecture_id").map_err(postgres::map_sqlx_error)?;
                rosters.entry(lecture_id).or_default().push(User::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM lectures
                WHERE deleted_at_secs IS NULL
                ORDER BY created_at_secs DESC, created_at_nsecs DESC, id DESC
                LIMIT ? OFFSET ?
            ";
            let mut rows = sqlx::query(query_str)
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch(&mut *ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                lectures.push(Lecture::try_from(row)?);
            }
            drop(rows);

            for lecture in &lectures {
                let query_str = "
                    SELECT ls.lecture_id AS roster_lecture_id, u.* FROM lecture_students ls
                    JOIN users u ON u.id = ls.user_id
                    WHERE u.deleted_at_secs IS NULL AND ls.lecture_id = ?
                    ORDER BY ls.created_at_secs, ls.created_at_nsecs, u.id
                ";
                let mut rows =
                    sqlx::query(query_str).bind(lecture.id().to_string()).fetch(&mut *ex);
                while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                    let lecture_id: String =
                        row.try_get("roster_lecture_id").map_err(sqlite::map_sqlx_error)?;
                    let lecture_id = parse_uuid(&lecture_id)?;
                    rosters.entry(lecture_id).or_default().push(User::try_from(row)?);
                }
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }

    Ok(lectures
        .into_iter()
        .map(|lecture| {
            let students = rosters.remove(lecture.id()).unwrap_or_default();
            lecture.with_students(students)
        })
        .collect())
}
