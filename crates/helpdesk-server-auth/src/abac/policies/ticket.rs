// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! View, edit, create and delete policies.

use super::Subject;
use crate::abac::{Action, Decision};

/// Evaluates a non-assignment action. `owner` is the resource's assigned
/// agent, or `None` when there is no resource or nobody is assigned.
pub fn evaluate(subject: &Subject<'_>, action: &Action, owner: Option<&str>) -> Decision {
	let perms = &subject.role.permissions;
	let role = &subject.role.display_name;

	match action {
		Action::Create => {
			if perms.can_create_tickets {
				Decision::allow()
			} else {
				Decision::deny(format!("role {role} cannot create tickets"))
			}
		}
		Action::Delete => {
			if perms.can_delete_tickets {
				Decision::allow()
			} else {
				Decision::deny(format!("role {role} cannot delete tickets"))
			}
		}
		Action::View => scoped(
			perms.can_view_all_tickets,
			perms.can_view_own_tickets,
			subject,
			owner,
			"view",
		),
		Action::Edit => scoped(
			perms.can_edit_all_tickets,
			perms.can_edit_own_tickets,
			subject,
			owner,
			"edit",
		),
		Action::AssignAgent(_) => Decision::deny("invalid action"),
	}
}

fn scoped(
	all: bool,
	own: bool,
	subject: &Subject<'_>,
	owner: Option<&str>,
	verb: &str,
) -> Decision {
	if all {
		return Decision::allow();
	}
	if !own {
		return Decision::deny(format!(
			"role {} cannot {verb} tickets",
			subject.role.display_name
		));
	}
	if subject.owns(owner) {
		Decision::allow()
	} else {
		Decision::deny(format!("you can only {verb} tickets assigned to you"))
	}
}
