// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ticket ownership matching.
//!
//! The `agent` column is free text typed by whoever last touched the ticket, so
//! the same person shows up as "Jesus Murrugarra", "JESUS MURRUGARRA" or just
//! "Jesus". In [`MatchMode::Fuzzy`] both sides are trimmed and lower-cased and
//! the actor owns the ticket when any of these hold:
//!
//! 1. stored value equals the actor's name
//! 2. stored value equals the actor's email
//! 3. stored value is contained in the actor's name
//! 4. actor's name is contained in the stored value
//!
//! Rules 3 and 4 are lossy: a ticket assigned to "Ana" is owned by "Mariana".
//! [`MatchMode::Exact`] keeps only rules 1 and 2.
//!
//! An empty stored value is never owned by anyone.

use serde::{Deserialize, Serialize};

use crate::Actor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
	#[default]
	Fuzzy,
	Exact,
}

/// Which rule established ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipMatch {
	ExactName,
	ExactEmail,
	StoredWithinName,
	NameWithinStored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameMatcher {
	mode: MatchMode,
}

impl NameMatcher {
	pub fn new(mode: MatchMode) -> Self {
		Self { mode }
	}

	pub fn mode(&self) -> MatchMode {
		self.mode
	}

	/// Returns the first rule under which `actor` owns a record whose agent
	/// field holds `stored`.
	pub fn match_owner(&self, stored: Option<&str>, actor: &Actor) -> Option<OwnershipMatch> {
		let stored = normalize(stored?);
		if stored.is_empty() {
			return None;
		}

		let name = normalize(&actor.display_name);
		let email = normalize(&actor.email);

		if !name.is_empty() && stored == name {
			return Some(OwnershipMatch::ExactName);
		}
		if !email.is_empty() && stored == email {
			return Some(OwnershipMatch::ExactEmail);
		}
		if self.mode == MatchMode::Exact || name.is_empty() {
			return None;
		}
		if name.contains(&stored) {
			return Some(OwnershipMatch::StoredWithinName);
		}
		if stored.contains(&name) {
			return Some(OwnershipMatch::NameWithinStored);
		}
		None
	}

	pub fn is_owner(&self, stored: Option<&str>, actor: &Actor) -> bool {
		self.match_owner(stored, actor).is_some()
	}
}

fn normalize(value: &str) -> String {
	value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn jesus() -> Actor {
		Actor::new("Jesus Murrugarra", "jmurrugarra@example.com", "agent")
	}

	mod fuzzy {
		use super::*;

		#[test]
		fn case_and_whitespace_are_ignored() {
			let m = NameMatcher::default();
			assert_eq!(
				m.match_owner(Some("  JESUS MURRUGARRA "), &jesus()),
				Some(OwnershipMatch::ExactName)
			);
		}

		#[test]
		fn email_matches() {
			let m = NameMatcher::default();
			assert_eq!(
				m.match_owner(Some("JMurrugarra@Example.com"), &jesus()),
				Some(OwnershipMatch::ExactEmail)
			);
		}

		#[test]
		fn first_name_only_is_owned() {
			let m = NameMatcher::default();
			assert_eq!(
				m.match_owner(Some("Jesus"), &jesus()),
				Some(OwnershipMatch::StoredWithinName)
			);
		}

		#[test]
		fn longer_stored_value_is_owned() {
			let m = NameMatcher::default();
			assert_eq!(
				m.match_owner(Some("Jesus Murrugarra (Sistemas)"), &jesus()),
				Some(OwnershipMatch::NameWithinStored)
			);
		}

		#[test]
		fn ana_matches_mariana() {
			let m = NameMatcher::default();
			let mariana = Actor::new("Mariana Flores", "", "agent");
			assert!(m.is_owner(Some("Ana"), &mariana));
		}

		#[test]
		fn unrelated_names_do_not_match() {
			let m = NameMatcher::default();
			assert!(!m.is_owner(Some("Luis Ramos"), &jesus()));
		}

		#[test]
		fn empty_actor_name_does_not_match_everything() {
			let m = NameMatcher::default();
			let nameless = Actor::new("", "", "agent");
			assert!(!m.is_owner(Some("Luis Ramos"), &nameless));
		}
	}

	mod exact {
		use super::*;

		#[test]
		fn substrings_do_not_count() {
			let m = NameMatcher::new(MatchMode::Exact);
			let mariana = Actor::new("Mariana Flores", "", "agent");
			assert!(!m.is_owner(Some("Ana"), &mariana));
			assert!(!m.is_owner(Some("Jesus"), &jesus()));
		}

		#[test]
		fn exact_name_and_email_still_count() {
			let m = NameMatcher::new(MatchMode::Exact);
			assert!(m.is_owner(Some("jesus murrugarra"), &jesus()));
			assert!(m.is_owner(Some("jmurrugarra@example.com"), &jesus()));
		}
	}

	mod unowned {
		use super::*;

		#[test]
		fn missing_or_blank_agent_is_never_owned() {
			let m = NameMatcher::default();
			assert!(!m.is_owner(None, &jesus()));
			assert!(!m.is_owner(Some(""), &jesus()));
			assert!(!m.is_owner(Some("   "), &jesus()));
		}
	}

	proptest! {
		#[test]
		fn empty_stored_value_is_never_owned(
			name in ".{0,20}",
			email in ".{0,20}",
			fuzzy in any::<bool>(),
		) {
			let mode = if fuzzy { MatchMode::Fuzzy } else { MatchMode::Exact };
			let actor = Actor::new(name, email, "agent");
			prop_assert!(!NameMatcher::new(mode).is_owner(Some(""), &actor));
		}

		#[test]
		fn exact_implies_fuzzy(stored in "[a-zA-Z ]{0,12}", name in "[a-zA-Z ]{0,12}") {
			let actor = Actor::new(name, "", "agent");
			if NameMatcher::new(MatchMode::Exact).is_owner(Some(&stored), &actor) {
				prop_assert!(NameMatcher::new(MatchMode::Fuzzy).is_owner(Some(&stored), &actor));
			}
		}
	}
}
