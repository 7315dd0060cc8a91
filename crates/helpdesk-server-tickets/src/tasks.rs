// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Follow-up tasks, gated by the same evaluator as tickets.

use std::sync::Arc;

use chrono::Utc;
use helpdesk_common_ticket::{Assignable, Task, TaskId, TaskStatus};
use helpdesk_server_auth::{Action, Actor, PermissionEvaluator};
use helpdesk_server_db::{DbError, TaskStore};
use tracing::{info, instrument};

use crate::error::{Result, TicketError};
use crate::request::NewTask;
use crate::service::{authorize, store_failure};
use crate::validation;

pub struct TaskService {
	store: Arc<dyn TaskStore>,
	evaluator: Arc<PermissionEvaluator>,
}

impl TaskService {
	pub fn new(store: Arc<dyn TaskStore>, evaluator: Arc<PermissionEvaluator>) -> Self {
		Self { store, evaluator }
	}

	#[instrument(skip(self, payload, actor), fields(actor = %actor.display_name))]
	pub async fn create_task(&self, payload: NewTask, actor: &Actor) -> Result<Task> {
		let (title, description, assignee) = validation::validate_new_task(&payload)?;
		self.authorize(actor, None, &Action::Create)?;
		if let Some(assignee) = &assignee {
			self.authorize(actor, None, &Action::AssignAgent(assignee.clone()))?;
		}

		let task = Task {
			id: TaskId::generate(),
			title,
			description,
			assignee,
			status: TaskStatus::Pending,
			created_at: Utc::now(),
		};
		let task = self.store.create_task(&task).await.map_err(store_failure)?;
		info!(task_id = %task.id, "task created");
		Ok(task)
	}

	#[instrument(skip(self, actor))]
	pub async fn list_visible_tasks(&self, actor: Option<&Actor>) -> Result<Vec<Task>> {
		let tasks = self.store.list_tasks().await.map_err(store_failure)?;
		Ok(self.evaluator.filter_visible(tasks, actor))
	}

	#[instrument(skip(self, actor), fields(actor = %actor.display_name))]
	pub async fn set_status(&self, id: TaskId, status: TaskStatus, actor: &Actor) -> Result<Task> {
		let task = self.load(id).await?;
		self.authorize(actor, Some(&task), &Action::Edit)?;

		match self.store.update_task_status(&id, status).await {
			Ok(task) => {
				info!(task_id = %id, status = status.as_str(), "task status changed");
				Ok(task)
			}
			Err(DbError::NotFound(_)) => Err(TicketError::TaskNotFound(id)),
			Err(e) => Err(store_failure(e)),
		}
	}

	#[instrument(skip(self, actor), fields(actor = %actor.display_name))]
	pub async fn delete_task(&self, id: TaskId, actor: &Actor) -> Result<Task> {
		let task = self.load(id).await?;
		self.authorize(actor, Some(&task), &Action::Delete)?;

		if !self.store.delete_task(&id).await.map_err(store_failure)? {
			return Err(TicketError::TaskNotFound(id));
		}
		info!(task_id = %id, "task deleted");
		Ok(task)
	}

	async fn load(&self, id: TaskId) -> Result<Task> {
		self.store
			.get_task(&id)
			.await
			.map_err(store_failure)?
			.ok_or(TicketError::TaskNotFound(id))
	}

	fn authorize(&self, actor: &Actor, task: Option<&Task>, action: &Action) -> Result<()> {
		authorize(
			&self.evaluator,
			actor,
			task.map(|t| t as &dyn Assignable),
			action,
		)
	}
}
