// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helpdesk HTTP server.
//!
//! Thin axum handlers over [`helpdesk_server_tickets`]. Every permission
//! question is answered by the shared [`PermissionEvaluator`]; handlers only
//! extract the actor, call the service and map errors.

pub mod api;
pub mod error;
pub mod extract;
pub mod identity;
pub mod routes;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use extract::ApiJson;
pub use helpdesk_server_auth::PermissionEvaluator;
pub use helpdesk_server_config::ServerConfig;
pub use identity::{CurrentActor, RequireActor};
