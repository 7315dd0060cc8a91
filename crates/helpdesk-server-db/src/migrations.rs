// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::SqlitePool;

use crate::error::Result;

const MIGRATIONS: &[(&str, &str)] = &[
	(
		"001_create_tickets",
		include_str!("../migrations/001_create_tickets.sql"),
	),
	(
		"002_create_tasks",
		include_str!("../migrations/002_create_tasks.sql"),
	),
];

/// Applies the embedded schema migrations.
///
/// Statements are idempotent, so this is safe to run on every start.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
	for (name, sql) in MIGRATIONS {
		for stmt in statements(sql) {
			if let Err(e) = sqlx::query(stmt).execute(pool).await {
				if !e.to_string().contains("already exists") {
					tracing::error!(migration = %name, error = %e, "migration failed");
					return Err(e.into());
				}
			}
		}
		tracing::debug!(migration = %name, "migration applied");
	}
	Ok(())
}

fn statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').map(str::trim).filter(|s| {
		!s.lines()
			.map(str::trim)
			.all(|l| l.is_empty() || l.starts_with("--"))
	})
}
