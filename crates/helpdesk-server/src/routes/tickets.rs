// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ticket HTTP handlers.
//!
//! Tickets have no id, so update and delete carry the identifying fields in
//! the request body.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use helpdesk_common_ticket::{Ticket, TicketIdentity};
use helpdesk_server_tickets::{NewTicket, TicketUpdate};
use serde::Serialize;

use crate::{
	api::AppState,
	error::ServerError,
	extract::ApiJson,
	identity::{CurrentActor, RequireActor},
};

#[derive(Debug, Serialize)]
pub struct ListTicketsResponse {
	pub tickets: Vec<Ticket>,
	pub total: usize,
}

/// GET /api/tickets - tickets the caller may see.
pub async fn list_tickets(
	State(state): State<AppState>,
	CurrentActor(actor): CurrentActor,
) -> Result<Json<ListTicketsResponse>, ServerError> {
	let tickets = state.tickets.list_visible_tickets(actor.as_ref()).await?;
	Ok(Json(ListTicketsResponse {
		total: tickets.len(),
		tickets,
	}))
}

/// POST /api/tickets
pub async fn create_ticket(
	State(state): State<AppState>,
	RequireActor(actor): RequireActor,
	ApiJson(payload): ApiJson<NewTicket>,
) -> Result<impl IntoResponse, ServerError> {
	let ticket = state.tickets.create_ticket(payload, &actor).await?;
	Ok((StatusCode::CREATED, Json(ticket)))
}

/// PUT /api/tickets - edit the ticket identified by `original`.
pub async fn update_ticket(
	State(state): State<AppState>,
	RequireActor(actor): RequireActor,
	ApiJson(update): ApiJson<TicketUpdate>,
) -> Result<Json<Ticket>, ServerError> {
	let ticket = state
		.tickets
		.update_ticket(
			&update.original,
			update.original_created_at,
			update.patch,
			&actor,
		)
		.await?;
	Ok(Json(ticket))
}

/// DELETE /api/tickets - returns the deleted row.
pub async fn delete_ticket(
	State(state): State<AppState>,
	RequireActor(actor): RequireActor,
	ApiJson(identity): ApiJson<TicketIdentity>,
) -> Result<Json<Ticket>, ServerError> {
	let ticket = state.tickets.delete_ticket(&identity, &actor).await?;
	Ok(Json(ticket))
}
