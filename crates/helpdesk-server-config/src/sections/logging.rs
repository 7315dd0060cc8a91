// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Logging configuration section.

use serde::Deserialize;

fn default_level() -> String {
	"info,tower_http::trace=debug".to_string()
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct LoggingConfigLayer {
	pub level: Option<String>,
}

impl LoggingConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.level.is_some() {
			self.level = other.level;
		}
	}

	pub fn finalize(self) -> LoggingConfig {
		LoggingConfig {
			level: self.level.unwrap_or_else(default_level),
		}
	}
}

/// Used as the `EnvFilter` directive when `RUST_LOG` is unset.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
	pub level: String,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: default_level(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_layer_finalize_defaults() {
		assert_eq!(
			LoggingConfigLayer::default().finalize().level,
			"info,tower_http::trace=debug"
		);
	}

	#[test]
	fn test_deserialize_layer_partial() {
		let layer: LoggingConfigLayer = toml::from_str("level = \"warn\"").unwrap();
		assert_eq!(layer.level.as_deref(), Some("warn"));
	}
}
