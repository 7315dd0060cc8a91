// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! JSON body extraction.
//!
//! [`ApiJson`] wraps axum's [`Json`] so a body that does not fit the payload
//! type is answered with the same 400 `validation_error` shape the services
//! use, naming the offending field where one can be read off the error.

use axum::{
	extract::{rejection::JsonRejection, FromRequest, Request},
	Json,
};
use helpdesk_server_tickets::TicketError;

use crate::error::ServerError;

/// Field reported when a body error cannot be tied to one field.
const BODY_FIELD: &str = "body";

/// A JSON request body whose rejections map to [`ServerError`].
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
	Json<T>: FromRequest<S, Rejection = JsonRejection>,
	S: Send + Sync,
{
	type Rejection = ServerError;

	async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
		match Json::<T>::from_request(req, state).await {
			Ok(Json(value)) => Ok(ApiJson(value)),
			Err(rejection) => Err(rejection_to_error(rejection)),
		}
	}
}

fn rejection_to_error(rejection: JsonRejection) -> ServerError {
	match rejection {
		JsonRejection::JsonDataError(e) => {
			let (field, message) = describe_data_error(&e.body_text());
			tracing::debug!(%field, %message, "request body rejected");
			TicketError::validation(field, message).into()
		}
		JsonRejection::JsonSyntaxError(_) => {
			ServerError::BadRequest("request body is not valid JSON".to_string())
		}
		JsonRejection::MissingJsonContentType(_) => {
			ServerError::BadRequest("expected an application/json body".to_string())
		}
		other => {
			tracing::debug!(error = %other.body_text(), "request body unreadable");
			ServerError::BadRequest("could not read request body".to_string())
		}
	}
}

/// Splits a deserialization failure into the field it concerns and a message.
///
/// Accepts axum's body text, `"<context>: [<path>: ]<serde message> at line L column C"`.
fn describe_data_error(body_text: &str) -> (String, String) {
	let detail = body_text
		.split_once(": ")
		.map_or(body_text, |(_, rest)| rest);
	let detail = detail
		.rfind(" at line ")
		.map_or(detail, |at| &detail[..at]);

	let (path, message) = match detail.split_once(": ") {
		Some((path, message)) if !path.is_empty() && !path.contains(' ') => (Some(path), message),
		_ => (None, detail),
	};

	if let Some(missing) = missing_field(message) {
		let field = match path {
			Some(path) => format!("{path}.{missing}"),
			None => missing.to_string(),
		};
		return (field, "is required".to_string());
	}

	match path {
		Some(path) => (path.to_string(), message.to_string()),
		None => (BODY_FIELD.to_string(), message.to_string()),
	}
}

fn missing_field(message: &str) -> Option<&str> {
	message
		.strip_prefix("missing field `")
		.and_then(|rest| rest.strip_suffix('`'))
}
