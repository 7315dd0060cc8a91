// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-action policy modules used by the evaluator.

pub mod assignment;
pub mod ticket;

use crate::{Actor, NameMatcher, Role};

/// An actor together with its resolved role.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
	pub actor: &'a Actor,
	pub role: &'a Role,
	pub matcher: NameMatcher,
}

impl Subject<'_> {
	pub fn owns(&self, agent: Option<&str>) -> bool {
		self.matcher.is_owner(agent, self.actor)
	}
}
