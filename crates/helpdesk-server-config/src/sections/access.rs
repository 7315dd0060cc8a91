// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access-control tuning.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How a ticket's agent field is compared to the acting user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipMatchMode {
	/// Case-insensitive, with substring matches in either direction.
	#[default]
	Fuzzy,
	/// Case-insensitive, whole name or email only.
	Exact,
}

impl FromStr for OwnershipMatchMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"fuzzy" => Ok(OwnershipMatchMode::Fuzzy),
			"exact" => Ok(OwnershipMatchMode::Exact),
			other => Err(format!("expected 'fuzzy' or 'exact', got '{other}'")),
		}
	}
}

impl fmt::Display for OwnershipMatchMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OwnershipMatchMode::Fuzzy => write!(f, "fuzzy"),
			OwnershipMatchMode::Exact => write!(f, "exact"),
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
	pub ownership_match: OwnershipMatchMode,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfigLayer {
	#[serde(default)]
	pub ownership_match: Option<OwnershipMatchMode>,
}

impl AccessConfigLayer {
	pub fn merge(&mut self, other: AccessConfigLayer) {
		if other.ownership_match.is_some() {
			self.ownership_match = other.ownership_match;
		}
	}

	pub fn finalize(self) -> AccessConfig {
		AccessConfig {
			ownership_match: self.ownership_match.unwrap_or_default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_to_fuzzy() {
		assert_eq!(
			AccessConfigLayer::default().finalize().ownership_match,
			OwnershipMatchMode::Fuzzy
		);
	}

	#[test]
	fn parses_from_toml_and_text() {
		let layer: AccessConfigLayer = toml::from_str("ownership_match = \"exact\"").unwrap();
		assert_eq!(layer.ownership_match, Some(OwnershipMatchMode::Exact));
		assert_eq!(" Exact ".parse::<OwnershipMatchMode>(), Ok(OwnershipMatchMode::Exact));
		assert!("loose".parse::<OwnershipMatchMode>().is_err());
	}
}
