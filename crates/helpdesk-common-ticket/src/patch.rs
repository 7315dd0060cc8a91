// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{AttentionType, Ticket, TicketStatus};

/// A single-field update.
///
/// On the wire an absent field is `Keep`, an explicit `null` is `Clear` and any
/// other value is `Set`. Fields must be annotated with `#[serde(default)]` for
/// the absent case to work.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Patch<T> {
	#[default]
	Keep,
	Clear,
	Set(T),
}

impl<T> Patch<T> {
	pub fn is_keep(&self) -> bool {
		matches!(self, Patch::Keep)
	}

	/// Applies the patch to an optional slot.
	pub fn apply_to(self, slot: &mut Option<T>) {
		match self {
			Patch::Keep => {}
			Patch::Clear => *slot = None,
			Patch::Set(v) => *slot = Some(v),
		}
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Ok(match Option::<T>::deserialize(deserializer)? {
			Some(v) => Patch::Set(v),
			None => Patch::Clear,
		})
	}
}

impl<T: Serialize> Serialize for Patch<T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Patch::Set(v) => serializer.serialize_some(v),
			_ => serializer.serialize_none(),
		}
	}
}

/// Requested changes to a ticket. Every field defaults to [`Patch::Keep`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketPatch {
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub requester: Patch<String>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub request_text: Patch<String>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub category: Patch<String>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub agent: Patch<String>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub area: Patch<String>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub site: Patch<String>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub status: Patch<TicketStatus>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub attention_type: Patch<AttentionType>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub closed_at: Patch<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Patch::is_keep")]
	pub solution_text: Patch<String>,
}

impl TicketPatch {
	pub fn is_empty(&self) -> bool {
		*self == TicketPatch::default()
	}

	/// Applies the patch in place. Clearing a required field leaves it untouched;
	/// validation rejects such patches before they get here.
	pub fn apply(&self, ticket: &mut Ticket) {
		if let Patch::Set(v) = &self.requester {
			ticket.requester = v.clone();
		}
		if let Patch::Set(v) = &self.request_text {
			ticket.request_text = v.clone();
		}
		if let Patch::Set(v) = &self.category {
			ticket.category = v.clone();
		}
		if let Patch::Set(v) = &self.status {
			ticket.status = *v;
		}
		self.agent.clone().apply_to(&mut ticket.agent);
		self.area.clone().apply_to(&mut ticket.area);
		self.site.clone().apply_to(&mut ticket.site);
		self.attention_type.clone().apply_to(&mut ticket.attention_type);
		self.closed_at.clone().apply_to(&mut ticket.closed_at);
		self.solution_text.clone().apply_to(&mut ticket.solution_text);
	}
}
