// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helpers for tests in this and downstream crates.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::Result;
use crate::migrations::run_migrations;

/// An in-memory database with the schema applied.
///
/// Each SQLite `:memory:` connection is its own database, so the pool is held
/// to a single connection that is never recycled.
pub async fn create_test_pool() -> Result<SqlitePool> {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect("sqlite::memory:")
		.await?;
	run_migrations(&pool).await?;
	Ok(pool)
}
