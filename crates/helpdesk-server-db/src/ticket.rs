// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ticket record store.
//!
//! Tickets are addressed only through an [`IdentityPredicate`]. Single-row
//! mutations run inside one `BEGIN IMMEDIATE` transaction: the predicate is
//! probed for at most two matches, and only when exactly one row matches is
//! that row (pinned by SQLite's implicit `rowid`) updated or deleted. Taking
//! the write lock before the probe means a concurrent writer is waited out
//! rather than invalidating the probe's snapshot, so a row changed underneath
//! shows up as no match.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use helpdesk_common_ticket::{IdentityPredicate, NullableMatch, Ticket, TicketPatch};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::error::{DbError, Result};

const TICKET_COLUMNS: &str = "requester, request_text, category, agent, area, site, status, \
	attention_type, created_at, closed_at, solution_text";

#[async_trait]
pub trait TicketStore: Send + Sync {
	async fn find_many(&self, predicate: &IdentityPredicate) -> Result<Vec<Ticket>>;

	async fn list_tickets(&self) -> Result<Vec<Ticket>>;

	async fn insert_one(&self, ticket: &Ticket) -> Result<Ticket>;

	/// Applies `patch` to the single row matching `predicate`.
	///
	/// Returns `Ok(None)` when nothing matches and [`DbError::Conflict`] when
	/// more than one row does; nothing is written in either case.
	async fn update_one(
		&self,
		predicate: &IdentityPredicate,
		patch: &TicketPatch,
	) -> Result<Option<Ticket>>;

	/// Deletes the single row matching `predicate` and returns it.
	async fn delete_one(&self, predicate: &IdentityPredicate) -> Result<Option<Ticket>>;

	async fn health_check(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct TicketRepository {
	pool: SqlitePool,
}

impl TicketRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, predicate), fields(requester = %predicate.requester()))]
	pub async fn find_many(&self, predicate: &IdentityPredicate) -> Result<Vec<Ticket>> {
		let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {TICKET_COLUMNS} FROM tickets"));
		push_predicate(&mut qb, predicate);
		qb.push(" ORDER BY created_at");

		let rows = qb.build().fetch_all(&self.pool).await?;
		rows.iter().map(row_to_ticket).collect()
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_tickets(&self) -> Result<Vec<Ticket>> {
		let rows = sqlx::query(&format!(
			"SELECT {TICKET_COLUMNS} FROM tickets ORDER BY created_at DESC"
		))
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_ticket).collect()
	}

	#[tracing::instrument(skip(self, ticket), fields(requester = %ticket.requester))]
	pub async fn insert_one(&self, ticket: &Ticket) -> Result<Ticket> {
		sqlx::query(
			r#"
			INSERT INTO tickets (
				requester, request_text, category, agent, area, site, status,
				attention_type, created_at, closed_at, solution_text
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(&ticket.requester)
		.bind(&ticket.request_text)
		.bind(&ticket.category)
		.bind(&ticket.agent)
		.bind(&ticket.area)
		.bind(&ticket.site)
		.bind(ticket.status.as_str())
		.bind(ticket.attention_type.map(|a| a.as_str()))
		.bind(format_timestamp(ticket.created_at))
		.bind(ticket.closed_at.map(format_timestamp))
		.bind(&ticket.solution_text)
		.execute(&self.pool)
		.await?;

		Ok(ticket.clone())
	}

	#[tracing::instrument(skip(self, predicate, patch), fields(requester = %predicate.requester()))]
	pub async fn update_one(
		&self,
		predicate: &IdentityPredicate,
		patch: &TicketPatch,
	) -> Result<Option<Ticket>> {
		let mut tx = self.begin_write().await?;

		let Some((rowid, mut ticket)) = probe_single(&mut tx, predicate).await? else {
			return Ok(None);
		};
		patch.apply(&mut ticket);

		sqlx::query(
			r#"
			UPDATE tickets SET
				requester = ?, request_text = ?, category = ?, agent = ?, area = ?,
				site = ?, status = ?, attention_type = ?, closed_at = ?, solution_text = ?
			WHERE rowid = ?
			"#,
		)
		.bind(&ticket.requester)
		.bind(&ticket.request_text)
		.bind(&ticket.category)
		.bind(&ticket.agent)
		.bind(&ticket.area)
		.bind(&ticket.site)
		.bind(ticket.status.as_str())
		.bind(ticket.attention_type.map(|a| a.as_str()))
		.bind(ticket.closed_at.map(format_timestamp))
		.bind(&ticket.solution_text)
		.bind(rowid)
		.execute(&mut *tx)
		.await?;

		tx.commit().await?;
		Ok(Some(ticket))
	}

	#[tracing::instrument(skip(self, predicate), fields(requester = %predicate.requester()))]
	pub async fn delete_one(&self, predicate: &IdentityPredicate) -> Result<Option<Ticket>> {
		let mut tx = self.begin_write().await?;

		let Some((rowid, ticket)) = probe_single(&mut tx, predicate).await? else {
			return Ok(None);
		};

		let result = sqlx::query("DELETE FROM tickets WHERE rowid = ?")
			.bind(rowid)
			.execute(&mut *tx)
			.await?;
		if result.rows_affected() != 1 {
			return Err(DbError::Internal(format!(
				"expected to delete one ticket, deleted {}",
				result.rows_affected()
			)));
		}

		tx.commit().await?;
		Ok(Some(ticket))
	}

	async fn begin_write(&self) -> Result<sqlx::Transaction<'static, Sqlite>> {
		Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
	}

	#[tracing::instrument(skip(self))]
	pub async fn health_check(&self) -> Result<()> {
		sqlx::query("SELECT 1").execute(&self.pool).await?;
		Ok(())
	}
}

#[async_trait]
impl TicketStore for TicketRepository {
	async fn find_many(&self, predicate: &IdentityPredicate) -> Result<Vec<Ticket>> {
		TicketRepository::find_many(self, predicate).await
	}

	async fn list_tickets(&self) -> Result<Vec<Ticket>> {
		TicketRepository::list_tickets(self).await
	}

	async fn insert_one(&self, ticket: &Ticket) -> Result<Ticket> {
		TicketRepository::insert_one(self, ticket).await
	}

	async fn update_one(
		&self,
		predicate: &IdentityPredicate,
		patch: &TicketPatch,
	) -> Result<Option<Ticket>> {
		TicketRepository::update_one(self, predicate, patch).await
	}

	async fn delete_one(&self, predicate: &IdentityPredicate) -> Result<Option<Ticket>> {
		TicketRepository::delete_one(self, predicate).await
	}

	async fn health_check(&self) -> Result<()> {
		TicketRepository::health_check(self).await
	}
}

/// Finds the one row matching `predicate`, returning its rowid.
async fn probe_single(
	tx: &mut sqlx::Transaction<'_, Sqlite>,
	predicate: &IdentityPredicate,
) -> Result<Option<(i64, Ticket)>> {
	let mut qb =
		QueryBuilder::<Sqlite>::new(format!("SELECT rowid, {TICKET_COLUMNS} FROM tickets"));
	push_predicate(&mut qb, predicate);
	qb.push(" LIMIT 2");

	let rows = qb.build().fetch_all(&mut **tx).await?;
	match rows.as_slice() {
		[] => Ok(None),
		[row] => {
			let rowid: i64 = row.try_get("rowid")?;
			Ok(Some((rowid, row_to_ticket(row)?)))
		}
		_ => {
			tracing::warn!(
				requester = %predicate.requester(),
				category = %predicate.category(),
				"identity predicate matched more than one ticket"
			);
			Err(DbError::Conflict(
				"identity predicate matched more than one ticket".to_string(),
			))
		}
	}
}

/// Renders an identity predicate as a `WHERE` clause.
///
/// An absent nullable value becomes `(col IS NULL OR col = '')`; a present one
/// becomes a plain equality.
fn push_predicate(qb: &mut QueryBuilder<'_, Sqlite>, predicate: &IdentityPredicate) {
	qb.push(" WHERE requester = ")
		.push_bind(predicate.requester().to_string())
		.push(" AND request_text = ")
		.push_bind(predicate.request_text().to_string())
		.push(" AND category = ")
		.push_bind(predicate.category().to_string());

	for condition in predicate.nullable_conditions() {
		let column = condition.column.as_str();
		match &condition.expected {
			NullableMatch::Absent => {
				qb.push(format!(" AND ({column} IS NULL OR {column} = '')"));
			}
			NullableMatch::Value(value) => {
				qb.push(format!(" AND {column} = ")).push_bind(value.clone());
			}
		}
	}

	if let Some(created_at) = predicate.created_at() {
		qb.push(" AND created_at = ")
			.push_bind(format_timestamp(created_at));
	}
}

/// Timestamps are stored with full precision so a pinned `created_at`
/// compares equal to the stored text.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
	ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(value)
		.map(|dt| dt.with_timezone(&Utc))
		.map_err(|e| DbError::MalformedRow(format!("{column} timestamp {value:?}: {e}")))
}

fn row_to_ticket(row: &SqliteRow) -> Result<Ticket> {
	let status: String = row.try_get("status")?;
	let attention_type: Option<String> = row.try_get("attention_type")?;
	let created_at: String = row.try_get("created_at")?;
	let closed_at: Option<String> = row.try_get("closed_at")?;

	Ok(Ticket {
		requester: row.try_get("requester")?,
		request_text: row.try_get("request_text")?,
		category: row.try_get("category")?,
		agent: row.try_get("agent")?,
		area: row.try_get("area")?,
		site: row.try_get("site")?,
		status: status.parse()?,
		attention_type: attention_type
			.filter(|a| !a.is_empty())
			.map(|a| a.parse())
			.transpose()?,
		created_at: parse_timestamp("created_at", &created_at)?,
		closed_at: closed_at
			.filter(|c| !c.is_empty())
			.map(|c| parse_timestamp("closed_at", &c))
			.transpose()?,
		solution_text: row.try_get("solution_text")?,
	})
}
