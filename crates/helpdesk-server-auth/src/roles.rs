// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The role table.
//!
//! Roles are fixed at startup. A [`RoleRegistry`] is built once, handed to the
//! [`crate::PermissionEvaluator`] and only ever read afterwards, so it can be
//! shared across request handlers without locking.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one of the four canonical roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleId {
	Admin,
	Supervisor,
	Agent,
	Employee,
}

impl RoleId {
	/// Returns all roles, most privileged first.
	pub fn all() -> &'static [RoleId] {
		&[
			RoleId::Admin,
			RoleId::Supervisor,
			RoleId::Agent,
			RoleId::Employee,
		]
	}

	/// Parses a role identifier, ignoring case and surrounding whitespace.
	pub fn parse(s: &str) -> Option<RoleId> {
		match s.trim().to_lowercase().as_str() {
			"admin" => Some(RoleId::Admin),
			"supervisor" => Some(RoleId::Supervisor),
			"agent" => Some(RoleId::Agent),
			"employee" => Some(RoleId::Employee),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			RoleId::Admin => "admin",
			RoleId::Supervisor => "supervisor",
			RoleId::Agent => "agent",
			RoleId::Employee => "employee",
		}
	}

	fn index(self) -> usize {
		match self {
			RoleId::Admin => 0,
			RoleId::Supervisor => 1,
			RoleId::Agent => 2,
			RoleId::Employee => 3,
		}
	}
}

impl fmt::Display for RoleId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Permission flags carried by a role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
	pub can_view_all_tickets: bool,
	pub can_edit_all_tickets: bool,
	pub can_create_tickets: bool,
	pub can_edit_own_tickets: bool,
	pub can_view_own_tickets: bool,
	pub can_delete_tickets: bool,
	pub can_manage_users: bool,
	pub can_view_reports: bool,
}

impl Permissions {
	pub fn all() -> Self {
		Self {
			can_view_all_tickets: true,
			can_edit_all_tickets: true,
			can_create_tickets: true,
			can_edit_own_tickets: true,
			can_view_own_tickets: true,
			can_delete_tickets: true,
			can_manage_users: true,
			can_view_reports: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
	pub id: RoleId,
	pub display_name: String,
	pub permissions: Permissions,
}

impl Role {
	/// The canonical definition of `id`.
	pub fn canonical(id: RoleId) -> Self {
		let (display_name, permissions) = match id {
			RoleId::Admin => ("Administrator", Permissions::all()),
			RoleId::Supervisor => (
				"Supervisor",
				Permissions {
					can_view_all_tickets: true,
					can_create_tickets: true,
					can_edit_own_tickets: true,
					can_view_reports: true,
					..Permissions::default()
				},
			),
			RoleId::Agent => (
				"Agent",
				Permissions {
					can_create_tickets: true,
					can_edit_own_tickets: true,
					can_view_own_tickets: true,
					..Permissions::default()
				},
			),
			RoleId::Employee => (
				"Employee",
				Permissions {
					can_create_tickets: true,
					..Permissions::default()
				},
			),
		};
		Self {
			id,
			display_name: display_name.to_string(),
			permissions,
		}
	}
}

/// Immutable lookup from role identifier to [`Role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
	roles: [Role; 4],
}

impl RoleRegistry {
	pub fn canonical() -> Self {
		Self {
			roles: [
				Role::canonical(RoleId::Admin),
				Role::canonical(RoleId::Supervisor),
				Role::canonical(RoleId::Agent),
				Role::canonical(RoleId::Employee),
			],
		}
	}

	/// Resolves a caller-supplied role identifier.
	///
	/// Unknown, blank or garbled identifiers resolve to Employee.
	pub fn get_role(&self, role_id: &str) -> &Role {
		let id = RoleId::parse(role_id).unwrap_or(RoleId::Employee);
		self.role(id)
	}

	pub fn role(&self, id: RoleId) -> &Role {
		&self.roles[id.index()]
	}

	pub fn roles(&self) -> &[Role] {
		&self.roles
	}
}

impl Default for RoleRegistry {
	fn default() -> Self {
		Self::canonical()
	}
}
