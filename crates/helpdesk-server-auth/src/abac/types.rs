// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::Serialize;
use std::fmt;

use crate::error::{AuthError, Result};

/// Operations that can be attempted on a ticket or task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
	View,
	Edit,
	Delete,
	Create,
	/// Set the owning agent to the given name. An empty name unassigns.
	AssignAgent(String),
}

impl Action {
	/// Parses an action by wire name. `assign_agent` takes its target from
	/// `target_agent`; the other actions ignore it.
	pub fn parse(name: &str, target_agent: Option<&str>) -> Result<Action> {
		match name.trim().to_lowercase().as_str() {
			"view" => Ok(Action::View),
			"edit" => Ok(Action::Edit),
			"delete" => Ok(Action::Delete),
			"create" => Ok(Action::Create),
			"assign_agent" | "assignagent" => target_agent
				.map(|t| Action::AssignAgent(t.to_string()))
				.ok_or(AuthError::MissingTargetAgent),
			_ => Err(AuthError::InvalidAction(name.to_string())),
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Action::View => "view",
			Action::Edit => "edit",
			Action::Delete => "delete",
			Action::Create => "create",
			Action::AssignAgent(_) => "assign_agent",
		}
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Action::AssignAgent(target) => write!(f, "assign_agent({target})"),
			other => f.write_str(other.name()),
		}
	}
}

/// Outcome of a permission check. A denial always carries a reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
	pub allowed: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub reason: Option<String>,
}

impl Decision {
	pub fn allow() -> Self {
		Self {
			allowed: true,
			reason: None,
		}
	}

	pub fn deny(reason: impl Into<String>) -> Self {
		Self {
			allowed: false,
			reason: Some(reason.into()),
		}
	}

	/// Converts a denial into [`AuthError::Forbidden`].
	pub fn into_result(self) -> Result<()> {
		if self.allowed {
			Ok(())
		} else {
			Err(AuthError::Forbidden(
				self.reason.unwrap_or_else(|| "access denied".to_string()),
			))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_known_actions() {
		assert_eq!(Action::parse("View", None), Ok(Action::View));
		assert_eq!(Action::parse(" edit ", None), Ok(Action::Edit));
		assert_eq!(Action::parse("delete", Some("ignored")), Ok(Action::Delete));
		assert_eq!(
			Action::parse("assign_agent", Some("Luis Ramos")),
			Ok(Action::AssignAgent("Luis Ramos".to_string()))
		);
	}

	#[test]
	fn parse_rejects_unknown_action() {
		assert_eq!(
			Action::parse("approve", None),
			Err(AuthError::InvalidAction("approve".to_string()))
		);
	}

	#[test]
	fn assign_agent_needs_a_target() {
		assert_eq!(
			Action::parse("assign_agent", None),
			Err(AuthError::MissingTargetAgent)
		);
	}

	#[test]
	fn decision_serialization_omits_reason_when_allowed() {
		let json = serde_json::to_value(Decision::allow()).unwrap();
		assert_eq!(json, serde_json::json!({"allowed": true}));

		let json = serde_json::to_value(Decision::deny("nope")).unwrap();
		assert_eq!(json, serde_json::json!({"allowed": false, "reason": "nope"}));
	}

	#[test]
	fn denial_becomes_forbidden() {
		assert_eq!(Decision::allow().into_result(), Ok(()));
		assert_eq!(
			Decision::deny("not yours").into_result(),
			Err(AuthError::Forbidden("not yours".to_string()))
		);
	}
}
