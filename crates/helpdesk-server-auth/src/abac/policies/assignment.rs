// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Agent assignment policy.

use super::Subject;
use crate::abac::Decision;
use crate::RoleId;

/// Whether the subject may set a ticket's agent to `target`.
///
/// Roles that see every ticket, and supervisors, may assign anyone. Agents
/// may only assign themselves. Everyone else is denied.
pub fn evaluate(subject: &Subject<'_>, target: &str) -> Decision {
	let role = subject.role;

	if role.permissions.can_view_all_tickets || role.id == RoleId::Supervisor {
		return Decision::allow();
	}

	if role.id == RoleId::Agent {
		return if subject.owns(Some(target)) {
			Decision::allow()
		} else {
			Decision::deny("agents can only assign tickets to themselves")
		};
	}

	Decision::deny(format!("role {} cannot assign agents", role.display_name))
}
