// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use helpdesk_common_ticket::{Task, TaskId, TaskStatus};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;

use crate::error::{DbError, Result};
use crate::ticket::{format_timestamp, parse_timestamp};

#[async_trait]
pub trait TaskStore: Send + Sync {
	async fn create_task(&self, task: &Task) -> Result<Task>;

	async fn get_task(&self, id: &TaskId) -> Result<Option<Task>>;

	async fn list_tasks(&self) -> Result<Vec<Task>>;

	async fn update_task_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task>;

	async fn delete_task(&self, id: &TaskId) -> Result<bool>;
}

#[derive(Clone)]
pub struct TaskRepository {
	pool: SqlitePool,
}

impl TaskRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, task), fields(task_id = %task.id))]
	pub async fn create_task(&self, task: &Task) -> Result<Task> {
		sqlx::query(
			r#"
			INSERT INTO tasks (id, title, description, assignee, status, created_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(task.id.to_string())
		.bind(&task.title)
		.bind(&task.description)
		.bind(&task.assignee)
		.bind(task.status.as_str())
		.bind(format_timestamp(task.created_at))
		.execute(&self.pool)
		.await?;

		Ok(task.clone())
	}

	#[tracing::instrument(skip(self), fields(task_id = %id))]
	pub async fn get_task(&self, id: &TaskId) -> Result<Option<Task>> {
		let row = sqlx::query(
			"SELECT id, title, description, assignee, status, created_at FROM tasks WHERE id = ?",
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.as_ref().map(row_to_task).transpose()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_tasks(&self) -> Result<Vec<Task>> {
		let rows = sqlx::query(
			"SELECT id, title, description, assignee, status, created_at FROM tasks ORDER BY created_at DESC",
		)
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_task).collect()
	}

	#[tracing::instrument(skip(self), fields(task_id = %id))]
	pub async fn update_task_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task> {
		let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
			.bind(status.as_str())
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("task {id}")));
		}

		self.get_task(id)
			.await?
			.ok_or_else(|| DbError::NotFound(format!("task {id}")))
	}

	#[tracing::instrument(skip(self), fields(task_id = %id))]
	pub async fn delete_task(&self, id: &TaskId) -> Result<bool> {
		let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}

#[async_trait]
impl TaskStore for TaskRepository {
	async fn create_task(&self, task: &Task) -> Result<Task> {
		TaskRepository::create_task(self, task).await
	}

	async fn get_task(&self, id: &TaskId) -> Result<Option<Task>> {
		TaskRepository::get_task(self, id).await
	}

	async fn list_tasks(&self) -> Result<Vec<Task>> {
		TaskRepository::list_tasks(self).await
	}

	async fn update_task_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task> {
		TaskRepository::update_task_status(self, id, status).await
	}

	async fn delete_task(&self, id: &TaskId) -> Result<bool> {
		TaskRepository::delete_task(self, id).await
	}
}

fn row_to_task(row: &SqliteRow) -> Result<Task> {
	let id: String = row.try_get("id")?;
	let status: String = row.try_get("status")?;
	let created_at: String = row.try_get("created_at")?;

	Ok(Task {
		id: TaskId::parse(&id)?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		assignee: row.try_get("assignee")?,
		status: status.parse()?,
		created_at: parse_timestamp("created_at", &created_at)?,
	})
}
