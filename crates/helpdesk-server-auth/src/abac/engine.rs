// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission evaluation engine.
//!
//! [`PermissionEvaluator::decide`] resolves the actor's role, then dispatches
//! to the policy module for the action:
//!
//! 1. **Assignment**: [`policies::assignment`] for [`Action::AssignAgent`]
//! 2. **Everything else**: [`policies::ticket`], with ownership taken from the
//!    resource's assigned agent
//!
//! Decisions are pure. The evaluator holds only the immutable role registry
//! and the ownership matcher chosen at startup.

use helpdesk_common_ticket::Assignable;
use tracing::{debug, instrument};

use super::filter;
use super::policies::{self, Subject};
use super::types::{Action, Decision};
use crate::error::AuthError;
use crate::{Actor, NameMatcher, Role, RoleRegistry};

#[derive(Debug, Clone, Default)]
pub struct PermissionEvaluator {
	registry: RoleRegistry,
	matcher: NameMatcher,
}

impl PermissionEvaluator {
	pub fn new(registry: RoleRegistry, matcher: NameMatcher) -> Self {
		Self { registry, matcher }
	}

	pub fn registry(&self) -> &RoleRegistry {
		&self.registry
	}

	pub fn matcher(&self) -> NameMatcher {
		self.matcher
	}

	/// The role an actor acts under. Unknown role ids resolve to Employee.
	pub fn role_of(&self, actor: &Actor) -> &Role {
		self.registry.get_role(&actor.role_id)
	}

	/// Decides whether `actor` may perform `action` on `resource`.
	///
	/// `resource` is `None` for actions that are not about an existing record,
	/// typically [`Action::Create`]. Ownership-scoped actions without a resource
	/// are denied unless the role has the corresponding "all" permission.
	#[instrument(
		level = "debug",
		skip(self, actor, resource),
		fields(actor = %actor.display_name, role = %actor.role_id, action = %action)
	)]
	pub fn decide(
		&self,
		actor: &Actor,
		resource: Option<&dyn Assignable>,
		action: &Action,
	) -> Decision {
		let subject = Subject {
			actor,
			role: self.role_of(actor),
			matcher: self.matcher,
		};

		let decision = match action {
			Action::AssignAgent(target) => policies::assignment::evaluate(&subject, target),
			_ => policies::ticket::evaluate(
				&subject,
				action,
				resource.and_then(|r| r.assigned_agent()),
			),
		};

		debug!(
			allowed = decision.allowed,
			reason = decision.reason.as_deref().unwrap_or(""),
			"permission decision"
		);
		decision
	}

	/// Like [`decide`](Self::decide) but takes the action by wire name.
	///
	/// Unrecognised actions are denied rather than reported as errors.
	pub fn decide_named(
		&self,
		actor: &Actor,
		resource: Option<&dyn Assignable>,
		action: &str,
		target_agent: Option<&str>,
	) -> Decision {
		match Action::parse(action, target_agent) {
			Ok(action) => self.decide(actor, resource, &action),
			Err(AuthError::MissingTargetAgent) => {
				Decision::deny("assign_agent requires a target agent")
			}
			Err(_) => Decision::deny("invalid action"),
		}
	}

	/// See [`filter_visible`](super::filter_visible).
	pub fn filter_visible<T: Assignable>(&self, items: Vec<T>, actor: Option<&Actor>) -> Vec<T> {
		filter::filter_visible(self, items, actor)
	}
}
