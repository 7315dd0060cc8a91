// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission queries for the presentation layer, which uses them to decide
//! which controls to show. Mutations re-check on their own.

use axum::{extract::State, Json};
use helpdesk_common_ticket::{Assignable, TicketIdentity};
use helpdesk_server_auth::Decision;
use serde::Deserialize;

use crate::{api::AppState, extract::ApiJson, identity::RequireActor};

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
	pub action: String,
	#[serde(default)]
	pub target_agent: Option<String>,
	#[serde(default)]
	pub ticket: Option<TicketIdentity>,
}

/// POST /api/decisions
pub async fn decide(
	State(state): State<AppState>,
	RequireActor(actor): RequireActor,
	ApiJson(req): ApiJson<DecisionRequest>,
) -> Json<Decision> {
	let resource = req.ticket.as_ref().map(|t| t as &dyn Assignable);
	Json(state.evaluator.decide_named(
		&actor,
		resource,
		&req.action,
		req.target_agent.as_deref(),
	))
}
