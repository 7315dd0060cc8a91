// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use helpdesk_server_tickets::TicketError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Service-level failure from the ticket or task service.
	#[error(transparent)]
	Ticket(#[from] TicketError),

	/// Invalid request payload.
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// No actor on the request.
	#[error("Unauthorized: {0}")]
	Unauthorized(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<String>,
}

impl ErrorResponse {
	pub fn new(error: &str, message: impl Into<String>) -> Self {
		Self {
			error: error.to_string(),
			message: message.into(),
			field: None,
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, body) = match self {
			ServerError::Ticket(TicketError::Validation { field, message }) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse {
					error: "validation_error".to_string(),
					message,
					field: Some(field),
				},
			),
			ServerError::Ticket(TicketError::Forbidden { reason }) => (
				StatusCode::FORBIDDEN,
				ErrorResponse::new("forbidden", reason),
			),
			ServerError::Ticket(e @ TicketError::NotFound) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("not_found", e.to_string()),
			),
			ServerError::Ticket(e @ TicketError::TaskNotFound(_)) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("not_found", e.to_string()),
			),
			ServerError::Ticket(e @ (TicketError::Ambiguous | TicketError::Store(_))) => {
				tracing::error!(error = %e, "request failed");
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorResponse::new("internal_error", "An internal error occurred"),
				)
			}
			ServerError::BadRequest(message) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("bad_request", message),
			),
			ServerError::Unauthorized(message) => {
				tracing::debug!(error = %message, "unauthorized");
				(
					StatusCode::UNAUTHORIZED,
					ErrorResponse::new("unauthorized", message),
				)
			}
		};

		(status, Json(body)).into_response()
	}
}
