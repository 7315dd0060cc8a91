// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Actor extraction.
//!
//! The session layer in front of this server authenticates the user and
//! forwards who they are in three headers:
//!
//! - `x-helpdesk-actor-name`
//! - `x-helpdesk-actor-email`
//! - `x-helpdesk-actor-role`
//!
//! A request with neither a name nor an email carries no actor. A missing or
//! unknown role is passed through as-is and resolves to the least privileged
//! role in the registry.

use axum::{
	extract::FromRequestParts,
	http::{request::Parts, HeaderMap},
	response::{IntoResponse, Response},
};
use helpdesk_server_auth::Actor;
use tracing::instrument;

use crate::error::ServerError;

pub const ACTOR_NAME_HEADER: &str = "x-helpdesk-actor-name";
pub const ACTOR_EMAIL_HEADER: &str = "x-helpdesk-actor-email";
pub const ACTOR_ROLE_HEADER: &str = "x-helpdesk-actor-role";

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
	headers
		.get(name)
		.and_then(|v| v.to_str().ok())
		.map(str::trim)
		.filter(|v| !v.is_empty())
		.map(str::to_string)
}

/// Reads the actor from request headers.
pub fn actor_from_headers(headers: &HeaderMap) -> Option<Actor> {
	let name = header(headers, ACTOR_NAME_HEADER);
	let email = header(headers, ACTOR_EMAIL_HEADER);
	if name.is_none() && email.is_none() {
		return None;
	}
	Some(Actor::new(
		name.unwrap_or_default(),
		email.unwrap_or_default(),
		header(headers, ACTOR_ROLE_HEADER).unwrap_or_default(),
	))
}

/// Extractor for handlers that behave differently without an actor.
pub struct CurrentActor(pub Option<Actor>);

impl<S> FromRequestParts<S> for CurrentActor
where
	S: Send + Sync,
{
	type Rejection = std::convert::Infallible;

	#[instrument(name = "CurrentActor::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let actor = actor_from_headers(&parts.headers);
		match &actor {
			Some(a) => tracing::debug!(actor = %a.display_name, role = %a.role_id, "actor present"),
			None => tracing::debug!("no actor on request"),
		}
		Ok(CurrentActor(actor))
	}
}

/// Extractor for handlers that need an actor. Rejects with 401 otherwise.
pub struct RequireActor(pub Actor);

impl<S> FromRequestParts<S> for RequireActor
where
	S: Send + Sync,
{
	type Rejection = Response;

	#[instrument(name = "RequireActor::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		actor_from_headers(&parts.headers)
			.map(RequireActor)
			.ok_or_else(|| {
				ServerError::Unauthorized("actor headers missing".to_string()).into_response()
			})
	}
}
