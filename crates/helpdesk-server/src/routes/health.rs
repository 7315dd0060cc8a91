// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::api::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: &'static str,
	pub database: &'static str,
}

/// GET /health - store ping.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	match state.tickets.health_check().await {
		Ok(()) => (
			StatusCode::OK,
			Json(HealthResponse {
				status: "healthy",
				database: "ok",
			}),
		),
		Err(e) => {
			tracing::error!(error = %e, "health check failed");
			(
				StatusCode::SERVICE_UNAVAILABLE,
				Json(HealthResponse {
					status: "unhealthy",
					database: "unreachable",
				}),
			)
		}
	}
}
