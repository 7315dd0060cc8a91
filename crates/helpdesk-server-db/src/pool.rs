// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{
	SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::str::FromStr;
use std::time::Duration;

use crate::error::DbError;

/// How long a ticket write waits for another writer's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_CONNECTIONS: u32 = 8;

/// Opens the ticket database in WAL mode.
///
/// Readers never block the single writer. Ticket mutations open
/// `BEGIN IMMEDIATE` transactions, so concurrent edits queue on the write
/// lock for up to [`BUSY_TIMEOUT`] instead of failing with `SQLITE_BUSY`.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, DbError> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| DbError::Internal(format!("Invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.busy_timeout(BUSY_TIMEOUT)
		.create_if_missing(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(MAX_CONNECTIONS)
		.connect_with(options)
		.await?;

	tracing::debug!(max_connections = MAX_CONNECTIONS, "ticket database pool created");
	Ok(pool)
}
