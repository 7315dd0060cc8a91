// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use helpdesk_common_ticket::Assignable;

use super::PermissionEvaluator;
use crate::Actor;

/// Keeps the items `actor` may see, in input order.
///
/// Roles with `can_view_all_tickets` get the input back untouched. Any other
/// role keeps only the items it owns according to the evaluator's matcher.
/// Without an actor nothing is visible.
pub fn filter_visible<T: Assignable>(
	evaluator: &PermissionEvaluator,
	items: Vec<T>,
	actor: Option<&Actor>,
) -> Vec<T> {
	let Some(actor) = actor else {
		return Vec::new();
	};

	if evaluator.role_of(actor).permissions.can_view_all_tickets {
		return items;
	}

	let matcher = evaluator.matcher();
	items
		.into_iter()
		.filter(|item| matcher.is_owner(item.assigned_agent(), actor))
		.collect()
}
