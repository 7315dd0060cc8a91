// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Area to site assignment.

use std::collections::HashMap;

pub const DEFAULT_SITE: &str = "Surquillo";

/// Some areas only exist at one site, whatever the caller says. Everything
/// else keeps the supplied site or falls back to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRules {
	default_site: String,
	/// Keyed by trimmed, lower-cased area.
	forced: HashMap<String, String>,
}

impl SiteRules {
	pub fn new(
		default_site: impl Into<String>,
		forced: impl IntoIterator<Item = (String, String)>,
	) -> Self {
		Self {
			default_site: default_site.into(),
			forced: forced
				.into_iter()
				.map(|(area, site)| (area_key(&area), site))
				.collect(),
		}
	}

	pub fn default_site(&self) -> &str {
		&self.default_site
	}

	/// The site `area` is pinned to, if any.
	pub fn forced_site(&self, area: &str) -> Option<&str> {
		self.forced.get(&area_key(area)).map(String::as_str)
	}

	pub fn resolve(&self, area: Option<&str>, supplied: Option<&str>) -> String {
		if let Some(site) = area.and_then(|a| self.forced_site(a)) {
			return site.to_string();
		}
		supplied
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.unwrap_or(&self.default_site)
			.to_string()
	}
}

impl Default for SiteRules {
	fn default() -> Self {
		Self::new(
			DEFAULT_SITE,
			[
				("Producción".to_string(), "Chorrillos".to_string()),
				("Almacén".to_string(), "Chorrillos".to_string()),
			],
		)
	}
}

fn area_key(area: &str) -> String {
	area.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn forced_areas_override_supplied_site() {
		let rules = SiteRules::default();
		assert_eq!(rules.resolve(Some("Producción"), Some("Surquillo")), "Chorrillos");
		assert_eq!(rules.resolve(Some(" almacén "), None), "Chorrillos");
		assert_eq!(rules.resolve(Some("PRODUCCIÓN"), None), "Chorrillos");
	}

	#[test]
	fn other_areas_keep_supplied_or_default() {
		let rules = SiteRules::default();
		assert_eq!(rules.resolve(Some("Finanzas"), Some("Chorrillos")), "Chorrillos");
		assert_eq!(rules.resolve(Some("Finanzas"), None), "Surquillo");
		assert_eq!(rules.resolve(Some("Finanzas"), Some("  ")), "Surquillo");
		assert_eq!(rules.resolve(None, None), "Surquillo");
	}

	#[test]
	fn custom_rules() {
		let rules = SiteRules::new("Miraflores", [("Logística".to_string(), "Callao".to_string())]);
		assert_eq!(rules.resolve(Some("logística"), None), "Callao");
		assert_eq!(rules.resolve(Some("Producción"), None), "Miraflores");
		assert_eq!(rules.default_site(), "Miraflores");
	}
}
