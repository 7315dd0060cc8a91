// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Payload validation.
//!
//! Strings are trimmed. Required fields must be non-blank; optional fields that
//! trim to nothing become `None` (or [`Patch::Clear`]). Identity fields used to
//! locate an existing row are checked but never rewritten, since they must
//! match what is stored byte for byte.

use chrono::{DateTime, Utc};
use helpdesk_common_ticket::{normalize_optional, Patch, Ticket, TicketIdentity, TicketPatch, TicketStatus};

use crate::error::{Result, TicketError};
use crate::request::{NewTask, NewTicket};

pub const NAME_MAX_LEN: usize = 200;
pub const TEXT_MAX_LEN: usize = 4000;

/// Builds the ticket to insert from a create payload.
pub fn validate_new_ticket(payload: NewTicket, now: DateTime<Utc>) -> Result<Ticket> {
	Ok(Ticket {
		requester: required("requester", &payload.requester, NAME_MAX_LEN)?,
		request_text: required("request_text", &payload.request_text, TEXT_MAX_LEN)?,
		category: required("category", &payload.category, NAME_MAX_LEN)?,
		area: Some(required(
			"area",
			payload.area.as_deref().unwrap_or_default(),
			NAME_MAX_LEN,
		)?),
		agent: optional("agent", payload.agent.as_deref(), NAME_MAX_LEN)?,
		site: optional("site", payload.site.as_deref(), NAME_MAX_LEN)?,
		status: payload.status.unwrap_or(TicketStatus::Closed),
		attention_type: payload.attention_type,
		created_at: now,
		closed_at: payload.closed_at,
		solution_text: optional("solution_text", payload.solution_text.as_deref(), TEXT_MAX_LEN)?,
	})
}

/// Checks the fields that locate an existing ticket.
pub fn validate_identity(identity: &TicketIdentity) -> Result<()> {
	for (field, value) in [
		("requester", &identity.requester),
		("request_text", &identity.request_text),
		("category", &identity.category),
	] {
		if value.trim().is_empty() {
			return Err(TicketError::validation(field, "is required"));
		}
	}
	Ok(())
}

/// Normalizes an edit. An edit that changes nothing is rejected.
pub fn validate_patch(patch: TicketPatch) -> Result<TicketPatch> {
	if patch.is_empty() {
		return Err(TicketError::validation("patch", "no changes requested"));
	}

	Ok(TicketPatch {
		requester: required_patch("requester", patch.requester, NAME_MAX_LEN)?,
		request_text: required_patch("request_text", patch.request_text, TEXT_MAX_LEN)?,
		category: required_patch("category", patch.category, NAME_MAX_LEN)?,
		agent: optional_patch("agent", patch.agent, NAME_MAX_LEN)?,
		area: optional_patch("area", patch.area, NAME_MAX_LEN)?,
		site: optional_patch("site", patch.site, NAME_MAX_LEN)?,
		solution_text: optional_patch("solution_text", patch.solution_text, TEXT_MAX_LEN)?,
		..patch
	})
}

pub fn validate_new_task(payload: &NewTask) -> Result<(String, Option<String>, Option<String>)> {
	Ok((
		required("title", &payload.title, NAME_MAX_LEN)?,
		optional("description", payload.description.as_deref(), TEXT_MAX_LEN)?,
		optional("assignee", payload.assignee.as_deref(), NAME_MAX_LEN)?,
	))
}

fn required(field: &str, value: &str, max: usize) -> Result<String> {
	let value = value.trim();
	if value.is_empty() {
		return Err(TicketError::validation(field, "is required"));
	}
	check_len(field, value, max)?;
	Ok(value.to_string())
}

fn optional(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>> {
	let value = normalize_optional(value);
	if let Some(v) = &value {
		check_len(field, v, max)?;
	}
	Ok(value)
}

fn required_patch(field: &str, patch: Patch<String>, max: usize) -> Result<Patch<String>> {
	match patch {
		Patch::Keep => Ok(Patch::Keep),
		Patch::Clear => Err(TicketError::validation(field, "cannot be cleared")),
		Patch::Set(v) => Ok(Patch::Set(required(field, &v, max)?)),
	}
}

fn optional_patch(field: &str, patch: Patch<String>, max: usize) -> Result<Patch<String>> {
	match patch {
		Patch::Set(v) => Ok(match optional(field, Some(&v), max)? {
			Some(v) => Patch::Set(v),
			None => Patch::Clear,
		}),
		other => Ok(other),
	}
}

fn check_len(field: &str, value: &str, max: usize) -> Result<()> {
	if value.chars().count() > max {
		return Err(TicketError::validation(
			field,
			format!("must be at most {max} characters"),
		));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn payload() -> NewTicket {
		NewTicket {
			requester: "  Maria Lopez ".to_string(),
			request_text: "Printer jammed".to_string(),
			category: "Hardware".to_string(),
			area: Some("Finanzas".to_string()),
			agent: Some("   ".to_string()),
			..Default::default()
		}
	}

	fn field_of(err: TicketError) -> String {
		match err {
			TicketError::Validation { field, .. } => field,
			other => panic!("expected validation error, got {other:?}"),
		}
	}

	mod create {
		use super::*;

		#[test]
		fn trims_and_defaults() {
			let now = Utc::now();
			let t = validate_new_ticket(payload(), now).unwrap();
			assert_eq!(t.requester, "Maria Lopez");
			assert_eq!(t.agent, None);
			assert_eq!(t.status, TicketStatus::Closed);
			assert_eq!(t.created_at, now);
		}

		#[test]
		fn area_is_required() {
			let mut p = payload();
			p.area = None;
			assert_eq!(field_of(validate_new_ticket(p, Utc::now()).unwrap_err()), "area");

			let mut p = payload();
			p.area = Some(" ".to_string());
			assert_eq!(field_of(validate_new_ticket(p, Utc::now()).unwrap_err()), "area");
		}

		#[test]
		fn blank_category_is_rejected() {
			let mut p = payload();
			p.category = "\t".to_string();
			assert_eq!(field_of(validate_new_ticket(p, Utc::now()).unwrap_err()), "category");
		}

		#[test]
		fn overlong_text_is_rejected() {
			let mut p = payload();
			p.request_text = "x".repeat(TEXT_MAX_LEN + 1);
			assert_eq!(
				field_of(validate_new_ticket(p, Utc::now()).unwrap_err()),
				"request_text"
			);

			let mut p = payload();
			p.request_text = "ñ".repeat(TEXT_MAX_LEN);
			assert!(validate_new_ticket(p, Utc::now()).is_ok());
		}
	}

	mod identity {
		use super::*;

		#[test]
		fn required_identity_fields() {
			let mut id = TicketIdentity {
				requester: "Maria Lopez".to_string(),
				request_text: "Printer jammed".to_string(),
				category: "Hardware".to_string(),
				..Default::default()
			};
			assert!(validate_identity(&id).is_ok());

			id.request_text = String::new();
			assert_eq!(field_of(validate_identity(&id).unwrap_err()), "request_text");
		}
	}

	mod patch {
		use super::*;

		#[test]
		fn empty_patch_is_rejected() {
			assert_eq!(field_of(validate_patch(TicketPatch::default()).unwrap_err()), "patch");
		}

		#[test]
		fn required_fields_cannot_be_cleared() {
			let p = TicketPatch {
				category: Patch::Clear,
				..Default::default()
			};
			assert_eq!(field_of(validate_patch(p).unwrap_err()), "category");

			let p = TicketPatch {
				requester: Patch::Set("  ".to_string()),
				..Default::default()
			};
			assert_eq!(field_of(validate_patch(p).unwrap_err()), "requester");
		}

		#[test]
		fn blank_optional_becomes_clear() {
			let p = TicketPatch {
				agent: Patch::Set("   ".to_string()),
				site: Patch::Set(" Chorrillos ".to_string()),
				..Default::default()
			};
			let p = validate_patch(p).unwrap();
			assert_eq!(p.agent, Patch::Clear);
			assert_eq!(p.site, Patch::Set("Chorrillos".to_string()));
		}

		#[test]
		fn non_string_fields_pass_through() {
			let p = TicketPatch {
				status: Patch::Set(TicketStatus::InProgress),
				closed_at: Patch::Clear,
				..Default::default()
			};
			assert_eq!(validate_patch(p.clone()).unwrap(), p);
		}
	}

	proptest! {
		#[test]
		fn validated_names_are_trimmed_and_bounded(name in "\\PC{0,250}") {
			match required("requester", &name, NAME_MAX_LEN) {
				Ok(v) => {
					prop_assert_eq!(v.trim(), v.as_str());
					prop_assert!(!v.is_empty());
					prop_assert!(v.chars().count() <= NAME_MAX_LEN);
				}
				Err(TicketError::Validation { field, .. }) => prop_assert_eq!(field, "requester"),
				Err(other) => prop_assert!(false, "unexpected error {other:?}"),
			}
		}
	}
}
