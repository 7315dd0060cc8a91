// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use chrono::{DateTime, Utc};
use helpdesk_common_ticket::{AttentionType, TicketIdentity, TicketPatch, TicketStatus};
use serde::{Deserialize, Serialize};

/// Payload for creating a ticket. Unset `status` defaults to closed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTicket {
	pub requester: String,
	pub request_text: String,
	pub category: String,
	#[serde(default)]
	pub agent: Option<String>,
	#[serde(default)]
	pub area: Option<String>,
	#[serde(default)]
	pub site: Option<String>,
	#[serde(default)]
	pub status: Option<TicketStatus>,
	#[serde(default)]
	pub attention_type: Option<AttentionType>,
	#[serde(default)]
	pub closed_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub solution_text: Option<String>,
}

/// An edit: the ticket as it was read, when it was created, and what to change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketUpdate {
	pub original: TicketIdentity,
	pub original_created_at: DateTime<Utc>,
	#[serde(default)]
	pub patch: TicketPatch,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTask {
	pub title: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub assignee: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;
	use helpdesk_common_ticket::Patch;

	#[test]
	fn update_payload_parses_nested_patch() {
		let json = r#"{
			"original": {
				"requester": "Rosa Quispe",
				"request_text": "VPN drops",
				"category": "Network",
				"agent": null
			},
			"original_created_at": "2024-06-03T14:05:09.123456Z",
			"patch": {"agent": "Luis Ramos", "site": null}
		}"#;
		let update: TicketUpdate = serde_json::from_str(json).unwrap();
		assert_eq!(update.original.agent, None);
		assert_eq!(update.patch.agent, Patch::Set("Luis Ramos".to_string()));
		assert_eq!(update.patch.site, Patch::Clear);
		assert_eq!(update.patch.area, Patch::Keep);
	}
}
