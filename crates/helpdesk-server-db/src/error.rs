// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Record store errors.

use helpdesk_common_ticket::ModelParseError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	/// No task with the requested id.
	#[error("Not found: {0}")]
	NotFound(String),

	/// A ticket identity matched more than one row. Nothing was written.
	#[error("Conflict: {0}")]
	Conflict(String),

	/// A stored value no longer parses into the ticket or task model.
	#[error("Malformed row: {0}")]
	MalformedRow(String),

	#[error("Internal: {0}")]
	Internal(String),
}

impl From<ModelParseError> for DbError {
	fn from(e: ModelParseError) -> Self {
		DbError::MalformedRow(e.to_string())
	}
}

pub type Result<T> = std::result::Result<T, DbError>;
