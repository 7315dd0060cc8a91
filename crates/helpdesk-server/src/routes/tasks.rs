// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use helpdesk_common_ticket::{Task, TaskId, TaskStatus};
use helpdesk_server_tickets::NewTask;
use serde::{Deserialize, Serialize};

use crate::{
	api::AppState,
	error::ServerError,
	extract::ApiJson,
	identity::{CurrentActor, RequireActor},
};

#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
	pub tasks: Vec<Task>,
	pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
	pub status: TaskStatus,
}

fn parse_task_id(id: &str) -> Result<TaskId, ServerError> {
	TaskId::parse(id).map_err(|_| ServerError::BadRequest(format!("invalid task id: {id}")))
}

/// GET /api/tasks
pub async fn list_tasks(
	State(state): State<AppState>,
	CurrentActor(actor): CurrentActor,
) -> Result<Json<ListTasksResponse>, ServerError> {
	let tasks = state.tasks.list_visible_tasks(actor.as_ref()).await?;
	Ok(Json(ListTasksResponse {
		total: tasks.len(),
		tasks,
	}))
}

/// POST /api/tasks
pub async fn create_task(
	State(state): State<AppState>,
	RequireActor(actor): RequireActor,
	ApiJson(payload): ApiJson<NewTask>,
) -> Result<impl IntoResponse, ServerError> {
	let task = state.tasks.create_task(payload, &actor).await?;
	Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
pub async fn update_task_status(
	State(state): State<AppState>,
	RequireActor(actor): RequireActor,
	Path(id): Path<String>,
	ApiJson(req): ApiJson<UpdateTaskStatusRequest>,
) -> Result<Json<Task>, ServerError> {
	let id = parse_task_id(&id)?;
	let task = state.tasks.set_status(id, req.status, &actor).await?;
	Ok(Json(task))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
	State(state): State<AppState>,
	RequireActor(actor): RequireActor,
	Path(id): Path<String>,
) -> Result<Json<Task>, ServerError> {
	let id = parse_task_id(&id)?;
	let task = state.tasks.delete_task(id, &actor).await?;
	Ok(Json(task))
}
