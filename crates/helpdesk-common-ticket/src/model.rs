// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelParseError;
use crate::identity::TicketIdentity;

/// Lifecycle state of a ticket.
///
/// Serializes to the snake_case wire name; deserializes through [`FromStr`],
/// so display names such as `"In Progress"` are accepted too.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum TicketStatus {
	Open,
	InProgress,
	Closed,
}

impl TicketStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			TicketStatus::Open => "open",
			TicketStatus::InProgress => "in_progress",
			TicketStatus::Closed => "closed",
		}
	}

	pub fn is_closed(&self) -> bool {
		matches!(self, TicketStatus::Closed)
	}
}

impl fmt::Display for TicketStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TicketStatus {
	type Err = ModelParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"open" => Ok(TicketStatus::Open),
			"in_progress" | "in progress" | "inprogress" => Ok(TicketStatus::InProgress),
			"closed" => Ok(TicketStatus::Closed),
			_ => Err(ModelParseError::InvalidStatus(s.to_string())),
		}
	}
}

impl TryFrom<String> for TicketStatus {
	type Error = ModelParseError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

/// Classification of the request, set by the attending agent.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AttentionType {
	Incident,
	Problem,
	Requirement,
}

impl AttentionType {
	pub fn as_str(&self) -> &'static str {
		match self {
			AttentionType::Incident => "incident",
			AttentionType::Problem => "problem",
			AttentionType::Requirement => "requirement",
		}
	}
}

impl fmt::Display for AttentionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for AttentionType {
	type Err = ModelParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"incident" => Ok(AttentionType::Incident),
			"problem" => Ok(AttentionType::Problem),
			"requirement" => Ok(AttentionType::Requirement),
			_ => Err(ModelParseError::InvalidAttentionType(s.to_string())),
		}
	}
}

impl TryFrom<String> for AttentionType {
	type Error = ModelParseError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

/// A helpdesk ticket as stored. Rows have no `id`; see [`crate::identity`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
	pub requester: String,
	pub request_text: String,
	pub category: String,
	/// The owning agent. Free text, entered inconsistently across the system.
	#[serde(default)]
	pub agent: Option<String>,
	#[serde(default)]
	pub area: Option<String>,
	#[serde(default)]
	pub site: Option<String>,
	pub status: TicketStatus,
	#[serde(default)]
	pub attention_type: Option<AttentionType>,
	pub created_at: DateTime<Utc>,
	#[serde(default)]
	pub closed_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub solution_text: Option<String>,
}

impl Ticket {
	/// The natural key of this ticket as it currently stands.
	pub fn identity(&self) -> TicketIdentity {
		TicketIdentity {
			requester: self.requester.clone(),
			request_text: self.request_text.clone(),
			category: self.category.clone(),
			agent: self.agent.clone(),
			area: self.area.clone(),
			site: self.site.clone(),
		}
	}
}

/// Anything that can be owned by an agent for permission purposes.
///
/// The permission evaluator never looks at more than this.
pub trait Assignable {
	fn assigned_agent(&self) -> Option<&str>;
}

impl Assignable for Ticket {
	fn assigned_agent(&self) -> Option<&str> {
		self.agent.as_deref()
	}
}

impl<T: Assignable + ?Sized> Assignable for &T {
	fn assigned_agent(&self) -> Option<&str> {
		(**self).assigned_agent()
	}
}

/// Trim an optional string, mapping blank values to `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
	value
		.map(str::trim)
		.filter(|v| !v.is_empty())
		.map(str::to_string)
}
