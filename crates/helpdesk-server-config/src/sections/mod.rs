// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for helpdesk-server.

pub mod access;
pub mod database;
pub mod http;
pub mod logging;
pub mod sites;

pub use access::{AccessConfig, AccessConfigLayer, OwnershipMatchMode};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use sites::{SitesConfig, SitesConfigLayer};
