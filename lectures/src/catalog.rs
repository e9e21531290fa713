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

//! Catalog of the errors raised by the service.
//!
//! Repository entries map to `NOT_FOUND` regardless of the underlying storage failure.  Clients
//! rely on these statuses, so they are kept even though most storage failures are not lookups.

use campus_core::catalog::CatalogError;
use http::StatusCode;

/// Failure to read or validate the configuration at startup.
pub const ENV_CONFIG_PARSE: CatalogError = CatalogError::new(
    "ENV_PARSE_ERR",
    "Failed to parse env file",
    StatusCode::INTERNAL_SERVER_ERROR,
);

/// Failure to connect to the database at startup.
pub const SETUP_DATABASE: CatalogError = CatalogError::new(
    "DATABASE_POSTGRES_ERR",
    "Failed to SetupDatabase",
    StatusCode::INTERNAL_SERVER_ERROR,
);

/// Failure to create the database schema at startup.
pub const INIT_SCHEMA: CatalogError = CatalogError::new(
    "DATABASE_POSTGRES_ERR",
    "Failed to InitSchema",
    StatusCode::INTERNAL_SERVER_ERROR,
);

/// Failure to bind or run the HTTP server.
pub const SERVE: CatalogError =
    CatalogError::new("SERVER_ERR", "Failed to Serve", StatusCode::INTERNAL_SERVER_ERROR);

/// Failure to store a new user.
pub const CREATE_USER_REPO: CatalogError =
    CatalogError::new("User_REPO", "Failed to CreateUser", StatusCode::NOT_FOUND);

/// Failure to store a new lecture.
pub const CREATE_LECTURE_REPO: CatalogError =
    CatalogError::new("Lecture_REPO", "Failed to CreateLecture", StatusCode::NOT_FOUND);

/// Failure to enroll a stored user in a stored lecture.
pub const ADD_STUDENT_TO_LECTURE_REPO: CatalogError = CatalogError::new(
    "Lecture_REPO",
    "Failed to AddStudentToLectureErr",
    StatusCode::NOT_FOUND,
);

/// Failure to remove a stored user from a stored lecture.
pub const DROP_USER_FROM_LECTURE_REPO: CatalogError = CatalogError::new(
    "Lecture_REPO",
    "Failed to DropUserFromLectureErr",
    StatusCode::NOT_FOUND,
);

/// Failure to read a page of lectures and their rosters.
pub const GET_LECTURES_STUDENTS_PP_REPO: CatalogError = CatalogError::new(
    "Lecture_REPO",
    "Failed to GetAllLecturesAndStudentsErr",
    StatusCode::NOT_FOUND,
);

/// Malformed request to create a user.
pub const CREATE_USER_HANDLER: CatalogError = CatalogError::new(
    "Server_handlers",
    "Failed to createUserHandlerErr",
    StatusCode::BAD_REQUEST,
);

/// Malformed request to enroll a student.
pub const ADD_STUDENT_TO_LECTURE_HANDLER: CatalogError = CatalogError::new(
    "Server_handlers",
    "Failed to addUserToLectureHandlerErr",
    StatusCode::BAD_REQUEST,
);

/// Malformed request to remove a student.
pub const DELETE_USER_FROM_LECTURE_HANDLER: CatalogError = CatalogError::new(
    "Server_handlers",
    "Failed to deleteUserFromLectureHandlerERR",
    StatusCode::BAD_REQUEST,
);

/// Malformed request to create a lecture.
pub const CREATE_LECTURE_HANDLER: CatalogError = CatalogError::new(
    "Server_handlers",
    "Failed to createLectureHandlerErr",
    StatusCode::BAD_REQUEST,
);

/// Malformed request to list lectures.
pub const GET_LECTURES_PP_HANDLER: CatalogError = CatalogError::new(
    "Server_handlers",
    "Failed to getLecturesPPHandlerErr",
    StatusCode::BAD_REQUEST,
);

/// Invalid lecture contents.
pub const CREATE_LECTURE_SERVICE: CatalogError = CatalogError::new(
    "Lecture_Service",
    "Failed to CreateLectureServiceErr",
    StatusCode::INTERNAL_SERVER_ERROR,
);

/// Invalid identifiers in an enrollment.
pub const ADD_STUDENT_TO_LECTURE_SERVICE: CatalogError = CatalogError::new(
    "Lecture_Service",
    "Failed to AddStudentToLectureServiceErr",
    StatusCode::INTERNAL_SERVER_ERROR,
);

/// Invalid identifiers in a removal.
pub const DELETE_USER_FROM_LECTURE_SERVICE: CatalogError = CatalogError::new(
    "Lecture_Service",
    "Failed to DeleteUserFromLectureServiceErr",
    StatusCode::INTERNAL_SERVER_ERROR,
);

/// Invalid pagination parameters.
pub const GET_LECTURES_PP_SERVICE: CatalogError = CatalogError::new(
    "Lecture_Service",
    "Failed to GetAllLecturesAndStudentsServiceErr",
    StatusCode::INTERNAL_SERVER_ERROR,
);

/// Failure to prepare a new user, such as when hashing its password.
pub const CREATE_USER_SERVICE: CatalogError = CatalogError::new(
    "User_Service",
    "Failed to CreateUserServiceErr",
    StatusCode::INTERNAL_SERVER_ERROR,
);
