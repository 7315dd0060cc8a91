// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the helpdesk server.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Consistent environment variable naming (`HELPDESK_SERVER_<SECTION>_<FIELD>`)
//! - Validation of the resolved values before the server starts
//!
//! # Usage
//!
//! ```ignore
//! use helpdesk_server_config::load_config;
//!
//! let config = load_config()?;
//! println!("Server listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;
use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
	pub access: AccessConfig,
	pub sites: SitesConfig,
}

impl ServerConfig {
	/// Get the socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`HELPDESK_SERVER_*`)
/// 2. Config file (`/etc/helpdesk/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merges `sources` in precedence order and resolves the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let http = layer.http.unwrap_or_default().finalize();
	let database = layer.database.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();
	let access = layer.access.unwrap_or_default().finalize();
	let sites = layer.sites.unwrap_or_default().finalize();

	sites.validate()?;

	info!(
		host = %http.host,
		port = http.port,
		database = %database.url,
		ownership_match = %access.ownership_match,
		default_site = %sites.default_site,
		forced_sites = sites.forced.len(),
		"Server configuration loaded"
	);

	Ok(ServerConfig {
		http,
		database,
		logging,
		access,
		sites,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	struct Fixed(&'static str, Precedence, &'static str);

	impl ConfigSource for Fixed {
		fn name(&self) -> &'static str {
			self.0
		}

		fn precedence(&self) -> Precedence {
			self.1
		}

		fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
			Ok(toml::from_str(self.2).unwrap())
		}
	}

	#[test]
	fn test_socket_addr() {
		let mut config = ServerConfig::default();
		config.http.host = "127.0.0.1".to_string();
		config.http.port = 9000;
		assert_eq!(config.socket_addr(), "127.0.0.1:9000");
	}

	#[test]
	fn higher_precedence_wins_regardless_of_order() {
		let config = load_from_sources(vec![
			Box::new(Fixed("env", Precedence::Environment, "[http]\nport = 7000")),
			Box::new(Fixed("file", Precedence::ConfigFile, "[http]\nport = 6000\nhost = \"10.0.0.1\"")),
			Box::new(DefaultsSource),
		])
		.unwrap();
		assert_eq!(config.http.port, 7000);
		assert_eq!(config.http.host, "10.0.0.1");
	}

	#[test]
	fn file_values_resolve() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
[access]
ownership_match = "exact"

[sites]
default_site = "Miraflores"
"#
		)
		.unwrap();
		let config = load_from_sources(vec![
			Box::new(DefaultsSource),
			Box::new(TomlSource::new(file.path())),
		])
		.unwrap();
		assert_eq!(config.access.ownership_match, OwnershipMatchMode::Exact);
		assert_eq!(config.sites.default_site, "Miraflores");
		assert_eq!(config.sites.forced.len(), 2);
	}

	#[test]
	fn invalid_sites_fail_finalize() {
		let err = load_from_sources(vec![Box::new(Fixed(
			"file",
			Precedence::ConfigFile,
			"[sites]\ndefault_site = \"  \"",
		))])
		.unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}
}
