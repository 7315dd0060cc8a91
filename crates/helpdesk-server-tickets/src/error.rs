// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use helpdesk_common_ticket::TaskId;
use helpdesk_server_auth::AuthError;
use helpdesk_server_db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TicketError {
	#[error("invalid {field}: {message}")]
	Validation { field: String, message: String },

	#[error("forbidden: {reason}")]
	Forbidden { reason: String },

	#[error("ticket not found or already modified")]
	NotFound,

	#[error("task {0} not found")]
	TaskNotFound(TaskId),

	#[error("ticket identity matched more than one record")]
	Ambiguous,

	#[error("store error: {0}")]
	Store(DbError),
}

impl TicketError {
	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		TicketError::Validation {
			field: field.into(),
			message: message.into(),
		}
	}
}

impl From<AuthError> for TicketError {
	fn from(e: AuthError) -> Self {
		match e {
			AuthError::Forbidden(reason) => TicketError::Forbidden { reason },
			other => TicketError::Forbidden {
				reason: other.to_string(),
			},
		}
	}
}

impl From<DbError> for TicketError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::Conflict(_) => TicketError::Ambiguous,
			other => TicketError::Store(other),
		}
	}
}

pub type Result<T> = std::result::Result<T, TicketError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn store_conflict_is_ambiguous() {
		let e: TicketError = DbError::Conflict("two rows".to_string()).into();
		assert!(matches!(e, TicketError::Ambiguous));

		let e: TicketError = DbError::Internal("boom".to_string()).into();
		assert!(matches!(e, TicketError::Store(_)));
	}

	#[test]
	fn denial_keeps_reason() {
		let e: TicketError = AuthError::Forbidden("not yours".to_string()).into();
		assert_eq!(e.to_string(), "forbidden: not yours");
	}
}
