// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Area to site assignment rules.
//!
//! ```toml
//! [sites]
//! default_site = "Surquillo"
//!
//! [sites.forced]
//! "Producción" = "Chorrillos"
//! "Almacén" = "Chorrillos"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::ConfigError;

const DEFAULT_SITE: &str = "Surquillo";

fn default_forced() -> BTreeMap<String, String> {
	BTreeMap::from([
		("Producción".to_string(), "Chorrillos".to_string()),
		("Almacén".to_string(), "Chorrillos".to_string()),
	])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitesConfig {
	pub default_site: String,
	/// Area name to the only site it exists at.
	pub forced: BTreeMap<String, String>,
}

impl Default for SitesConfig {
	fn default() -> Self {
		SitesConfigLayer::default().finalize()
	}
}

impl SitesConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.default_site.trim().is_empty() {
			return Err(ConfigError::Validation(
				"sites.default_site must not be empty".to_string(),
			));
		}
		for (area, site) in &self.forced {
			if area.trim().is_empty() || site.trim().is_empty() {
				return Err(ConfigError::Validation(format!(
					"sites.forced entry '{area}' = '{site}' must name both an area and a site"
				)));
			}
		}
		Ok(())
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SitesConfigLayer {
	#[serde(default)]
	pub default_site: Option<String>,
	/// Replaces the whole table when present.
	#[serde(default)]
	pub forced: Option<BTreeMap<String, String>>,
}

impl SitesConfigLayer {
	pub fn merge(&mut self, other: SitesConfigLayer) {
		if other.default_site.is_some() {
			self.default_site = other.default_site;
		}
		if other.forced.is_some() {
			self.forced = other.forced;
		}
	}

	pub fn finalize(self) -> SitesConfig {
		SitesConfig {
			default_site: self
				.default_site
				.unwrap_or_else(|| DEFAULT_SITE.to_string()),
			forced: self.forced.unwrap_or_else(default_forced),
		}
	}
}

/// Parses `Area=Site,Area=Site`.
pub fn parse_forced_sites(key: &str, value: &str) -> Result<BTreeMap<String, String>, ConfigError> {
	value
		.split(',')
		.map(str::trim)
		.filter(|pair| !pair.is_empty())
		.map(|pair| {
			pair.split_once('=')
				.map(|(area, site)| (area.trim().to_string(), site.trim().to_string()))
				.ok_or_else(|| ConfigError::InvalidValue {
					key: key.to_string(),
					message: format!("expected Area=Site, got '{pair}'"),
				})
		})
		.collect()
}
