// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router.

use std::sync::Arc;

use axum::{
	routing::{get, post, put},
	Router,
};
use helpdesk_server_auth::{MatchMode, NameMatcher, PermissionEvaluator, RoleRegistry};
use helpdesk_server_config::{OwnershipMatchMode, ServerConfig};
use helpdesk_server_db::{TaskRepository, TicketRepository};
use helpdesk_server_tickets::{SiteRules, TaskService, TicketService};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::routes;

#[derive(Clone)]
pub struct AppState {
	pub tickets: Arc<TicketService>,
	pub tasks: Arc<TaskService>,
	pub evaluator: Arc<PermissionEvaluator>,
}

fn match_mode(mode: OwnershipMatchMode) -> MatchMode {
	match mode {
		OwnershipMatchMode::Fuzzy => MatchMode::Fuzzy,
		OwnershipMatchMode::Exact => MatchMode::Exact,
	}
}

/// Wires repositories, the evaluator and the services from `config`.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let evaluator = Arc::new(PermissionEvaluator::new(
		RoleRegistry::canonical(),
		NameMatcher::new(match_mode(config.access.ownership_match)),
	));
	let site_rules = SiteRules::new(
		config.sites.default_site.clone(),
		config.sites.forced.clone(),
	);

	let tickets = TicketService::new(
		Arc::new(TicketRepository::new(pool.clone())),
		Arc::clone(&evaluator),
		site_rules,
	);
	let tasks = TaskService::new(Arc::new(TaskRepository::new(pool)), Arc::clone(&evaluator));

	AppState {
		tickets: Arc::new(tickets),
		tasks: Arc::new(tasks),
		evaluator,
	}
}

pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(routes::health::health_check))
		.route(
			"/api/tickets",
			get(routes::tickets::list_tickets)
				.post(routes::tickets::create_ticket)
				.put(routes::tickets::update_ticket)
				.delete(routes::tickets::delete_ticket),
		)
		.route("/api/decisions", post(routes::decisions::decide))
		.route(
			"/api/tasks",
			get(routes::tasks::list_tasks).post(routes::tasks::create_task),
		)
		.route(
			"/api/tasks/{id}",
			put(routes::tasks::update_task_status).delete(routes::tasks::delete_task),
		)
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
