// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::sites::parse_forced_sites;
use crate::sections::{
	AccessConfigLayer, DatabaseConfigLayer, HttpConfigLayer, LoggingConfigLayer, OwnershipMatchMode,
	SitesConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source. A missing file is not an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/helpdesk/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: HELPDESK_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from_lookup(&|name: &str| std::env::var(name).ok())
	}
}

type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Builds a layer from a variable lookup. Empty values count as unset.
fn load_from_lookup(lookup: Lookup<'_>) -> Result<ServerConfigLayer, ConfigError> {
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

	let port = match var("HELPDESK_SERVER_HTTP_PORT") {
		Some(v) => Some(v.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
			key: "HELPDESK_SERVER_HTTP_PORT".to_string(),
			message: format!("invalid u16 value '{v}'"),
		})?),
		None => None,
	};

	let ownership_match = match var("HELPDESK_SERVER_ACCESS_OWNERSHIP_MATCH") {
		Some(v) => Some(v.parse::<OwnershipMatchMode>().map_err(|message| {
			ConfigError::InvalidValue {
				key: "HELPDESK_SERVER_ACCESS_OWNERSHIP_MATCH".to_string(),
				message,
			}
		})?),
		None => None,
	};

	let forced = var("HELPDESK_SERVER_SITES_FORCED")
		.map(|v| parse_forced_sites("HELPDESK_SERVER_SITES_FORCED", &v))
		.transpose()?;

	Ok(ServerConfigLayer {
		http: Some(HttpConfigLayer {
			host: var("HELPDESK_SERVER_HTTP_HOST"),
			port,
		}),
		database: Some(DatabaseConfigLayer {
			url: var("HELPDESK_SERVER_DATABASE_URL"),
		}),
		logging: Some(LoggingConfigLayer {
			level: var("HELPDESK_SERVER_LOGGING_LEVEL"),
		}),
		access: Some(AccessConfigLayer { ownership_match }),
		sites: Some(SitesConfigLayer {
			default_site: var("HELPDESK_SERVER_SITES_DEFAULT_SITE"),
			forced,
		}),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;
	use std::io::Write;

	fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name| map.get(name).cloned()
	}

	mod env {
		use super::*;

		#[test]
		fn reads_every_section() {
			let lookup = lookup_from(&[
				("HELPDESK_SERVER_HTTP_HOST", "127.0.0.1"),
				("HELPDESK_SERVER_HTTP_PORT", "9100"),
				("HELPDESK_SERVER_DATABASE_URL", "sqlite::memory:"),
				("HELPDESK_SERVER_LOGGING_LEVEL", "debug"),
				("HELPDESK_SERVER_ACCESS_OWNERSHIP_MATCH", "exact"),
				("HELPDESK_SERVER_SITES_DEFAULT_SITE", "Miraflores"),
				("HELPDESK_SERVER_SITES_FORCED", "Logística=Callao"),
			]);
			let layer = load_from_lookup(&lookup).unwrap();
			let http = layer.http.unwrap();
			assert_eq!(http.host.as_deref(), Some("127.0.0.1"));
			assert_eq!(http.port, Some(9100));
			assert_eq!(
				layer.access.unwrap().ownership_match,
				Some(OwnershipMatchMode::Exact)
			);
			let sites = layer.sites.unwrap().finalize();
			assert_eq!(sites.default_site, "Miraflores");
			assert_eq!(sites.forced["Logística"], "Callao");
		}

		#[test]
		fn empty_values_are_unset() {
			let lookup = lookup_from(&[("HELPDESK_SERVER_HTTP_HOST", "")]);
			let layer = load_from_lookup(&lookup).unwrap();
			assert!(layer.http.unwrap().host.is_none());
		}

		#[test]
		fn bad_port_names_the_variable() {
			let lookup = lookup_from(&[("HELPDESK_SERVER_HTTP_PORT", "eighty")]);
			match load_from_lookup(&lookup) {
				Err(ConfigError::InvalidValue { key, .. }) => {
					assert_eq!(key, "HELPDESK_SERVER_HTTP_PORT")
				}
				other => panic!("unexpected {other:?}"),
			}
		}

		#[test]
		fn bad_match_mode_is_rejected() {
			let lookup = lookup_from(&[("HELPDESK_SERVER_ACCESS_OWNERSHIP_MATCH", "loose")]);
			assert!(load_from_lookup(&lookup).is_err());
		}
	}

	mod toml_file {
		use super::*;

		#[test]
		fn missing_file_is_empty_layer() {
			let dir = tempfile::tempdir().unwrap();
			let layer = TomlSource::new(dir.path().join("absent.toml")).load().unwrap();
			assert!(layer.http.is_none());
		}

		#[test]
		fn reads_file() {
			let mut file = tempfile::NamedTempFile::new().unwrap();
			writeln!(file, "[database]\nurl = \"sqlite:/tmp/helpdesk.db\"").unwrap();
			let layer = TomlSource::new(file.path()).load().unwrap();
			assert_eq!(
				layer.database.unwrap().url.as_deref(),
				Some("sqlite:/tmp/helpdesk.db")
			);
		}

		#[test]
		fn malformed_file_reports_path() {
			let mut file = tempfile::NamedTempFile::new().unwrap();
			writeln!(file, "[http\nport = ").unwrap();
			let err = TomlSource::new(file.path()).load().unwrap_err();
			assert!(matches!(err, ConfigError::TomlParse { .. }));
		}
	}

	#[test]
	fn precedence_orders_sources() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}
}
