// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Follow-up tasks. Unlike tickets they carry a surrogate id.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelParseError;
use crate::model::Assignable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
	pub fn generate() -> Self {
		Self(Uuid::new_v4())
	}

	pub fn parse(s: &str) -> Result<Self, ModelParseError> {
		Ok(Self(Uuid::parse_str(s)?))
	}
}

impl fmt::Display for TaskId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for TaskId {
	type Err = ModelParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum TaskStatus {
	#[default]
	Pending,
	Done,
}

impl TaskStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			TaskStatus::Pending => "pending",
			TaskStatus::Done => "done",
		}
	}
}

impl FromStr for TaskStatus {
	type Err = ModelParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"pending" => Ok(TaskStatus::Pending),
			"done" => Ok(TaskStatus::Done),
			_ => Err(ModelParseError::InvalidTaskStatus(s.to_string())),
		}
	}
}

impl TryFrom<String> for TaskStatus {
	type Error = ModelParseError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
	pub id: TaskId,
	pub title: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub assignee: Option<String>,
	#[serde(default)]
	pub status: TaskStatus,
	pub created_at: DateTime<Utc>,
}

impl Assignable for Task {
	fn assigned_agent(&self) -> Option<&str> {
		self.assignee.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn task_id_parse_round_trip() {
		let id = TaskId::generate();
		assert_eq!(TaskId::parse(&id.to_string()).unwrap(), id);
		assert!(TaskId::parse("not-a-uuid").is_err());
	}

	#[test]
	fn task_status_parse() {
		assert_eq!("Done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
		assert!("archived".parse::<TaskStatus>().is_err());
		assert_eq!(
			serde_json::from_str::<TaskStatus>("\"Done\"").unwrap(),
			TaskStatus::Done
		);
	}

	#[test]
	fn assignee_is_the_owner() {
		let task = Task {
			id: TaskId::generate(),
			title: "Replace toner".to_string(),
			description: None,
			assignee: Some("Luis Ramos".to_string()),
			status: TaskStatus::Pending,
			created_at: Utc::now(),
		};
		assert_eq!(task.assigned_agent(), Some("Luis Ramos"));
	}
}
