// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

/// The user on whose behalf an operation runs.
///
/// `role_id` is kept as the raw string the caller supplied. Resolution happens
/// in [`crate::RoleRegistry::get_role`], which falls back to the least
/// privileged role for anything it does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
	pub display_name: String,
	#[serde(default)]
	pub email: String,
	pub role_id: String,
}

impl Actor {
	pub fn new(
		display_name: impl Into<String>,
		email: impl Into<String>,
		role_id: impl Into<String>,
	) -> Self {
		Self {
			display_name: display_name.into(),
			email: email.into(),
			role_id: role_id.into(),
		}
	}
}
