// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Natural-key identity for tickets.
//!
//! The tickets table has no surrogate id, so updates and deletes locate their
//! row through an [`IdentityPredicate`] built from business fields.
//!
//! # NULL / empty-string equivalence
//!
//! `agent`, `area` and `site` may be stored as SQL `NULL` or as `''` depending
//! on which code path wrote the row. The supplied value is collapsed into a
//! [`NullableMatch`] and compared as follows:
//!
//! ```text
//! supplied \ stored | NULL | ''  | 'x' | 'y'
//! ------------------+------+-----+-----+-----
//! null or ''        |  yes | yes | no  | no
//! 'x'               |  no  | no  | yes | no
//! ```
//!
//! `requester`, `request_text` and `category` are required and compared with
//! strict equality. Update predicates additionally pin `created_at` to the
//! value observed before editing began, which acts as a poor man's row
//! version: if anything in the key changed in between, the predicate matches
//! nothing and the caller gets a not-found instead of touching another row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Assignable, Ticket};

/// The business fields that identify a ticket row.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketIdentity {
	pub requester: String,
	pub request_text: String,
	pub category: String,
	#[serde(default)]
	pub agent: Option<String>,
	#[serde(default)]
	pub area: Option<String>,
	#[serde(default)]
	pub site: Option<String>,
}

impl Assignable for TicketIdentity {
	fn assigned_agent(&self) -> Option<&str> {
		self.agent.as_deref()
	}
}

/// How a supplied nullable value constrains a stored column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NullableMatch {
	/// Supplied value was null or empty: stored NULL or '' matches.
	Absent,
	/// Supplied value was a real string: only that exact string matches.
	Value(String),
}

impl NullableMatch {
	pub fn from_supplied(value: Option<&str>) -> Self {
		match value {
			None | Some("") => NullableMatch::Absent,
			Some(v) => NullableMatch::Value(v.to_string()),
		}
	}

	pub fn matches(&self, stored: Option<&str>) -> bool {
		match (self, stored) {
			(NullableMatch::Absent, None) => true,
			(NullableMatch::Absent, Some(s)) => s.is_empty(),
			(NullableMatch::Value(v), Some(s)) => v == s,
			(NullableMatch::Value(_), None) => false,
		}
	}
}

/// Columns that take part in the NULL/empty equivalence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NullableColumn {
	Agent,
	Area,
	Site,
}

impl NullableColumn {
	pub fn as_str(&self) -> &'static str {
		match self {
			NullableColumn::Agent => "agent",
			NullableColumn::Area => "area",
			NullableColumn::Site => "site",
		}
	}
}

/// A single column condition inside an [`IdentityPredicate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullableCondition {
	pub column: NullableColumn,
	pub expected: NullableMatch,
}

impl NullableCondition {
	pub fn matches(&self, ticket: &Ticket) -> bool {
		let stored = match self.column {
			NullableColumn::Agent => ticket.agent.as_deref(),
			NullableColumn::Area => ticket.area.as_deref(),
			NullableColumn::Site => ticket.site.as_deref(),
		};
		self.expected.matches(stored)
	}
}

/// Builds the condition for one nullable column.
pub fn matches_nullable(column: NullableColumn, supplied: Option<&str>) -> NullableCondition {
	NullableCondition {
		column,
		expected: NullableMatch::from_supplied(supplied),
	}
}

/// Opaque matching condition handed to the record store.
///
/// Store implementations read it through the accessors; callers only build it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityPredicate {
	requester: String,
	request_text: String,
	category: String,
	nullable: [NullableCondition; 3],
	created_at: Option<DateTime<Utc>>,
}

impl IdentityPredicate {
	pub fn requester(&self) -> &str {
		&self.requester
	}

	pub fn request_text(&self) -> &str {
		&self.request_text
	}

	pub fn category(&self) -> &str {
		&self.category
	}

	/// Conditions for `agent`, `area` and `site`, in that order.
	pub fn nullable_conditions(&self) -> &[NullableCondition] {
		&self.nullable
	}

	/// The pinned creation timestamp, present only on update predicates.
	pub fn created_at(&self) -> Option<DateTime<Utc>> {
		self.created_at
	}

	/// Evaluates the predicate against an in-memory row.
	pub fn matches(&self, ticket: &Ticket) -> bool {
		ticket.requester == self.requester
			&& ticket.request_text == self.request_text
			&& ticket.category == self.category
			&& self.nullable.iter().all(|c| c.matches(ticket))
			&& self.created_at.map_or(true, |ts| ticket.created_at == ts)
	}
}

/// Builds the predicate used to delete a ticket.
pub fn build_predicate(identity: &TicketIdentity) -> IdentityPredicate {
	IdentityPredicate {
		requester: identity.requester.clone(),
		request_text: identity.request_text.clone(),
		category: identity.category.clone(),
		nullable: [
			matches_nullable(NullableColumn::Agent, identity.agent.as_deref()),
			matches_nullable(NullableColumn::Area, identity.area.as_deref()),
			matches_nullable(NullableColumn::Site, identity.site.as_deref()),
		],
		created_at: None,
	}
}

/// Builds the predicate used to update a ticket, pinned to the creation
/// timestamp captured before the edit started.
pub fn build_update_predicate(
	identity: &TicketIdentity,
	created_at: DateTime<Utc>,
) -> IdentityPredicate {
	IdentityPredicate {
		created_at: Some(created_at),
		..build_predicate(identity)
	}
}
