// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helpdesk server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use helpdesk_server::{create_app_state, create_router};
use helpdesk_server_auth::RoleRegistry;
use helpdesk_server_config::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Helpdesk server - ticket store with role-based access control.
#[derive(Parser, Debug)]
#[command(name = "helpdesk-server", about = "Helpdesk ticket server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/helpdesk/server.toml)
	#[arg(long, env = "HELPDESK_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Run the HTTP server (default)
	Serve,
	/// Apply database migrations and exit
	Migrate,
	/// Print the role registry and exit
	Roles,
}

fn load_config(args: &Args) -> Result<ServerConfig, helpdesk_server_config::ConfigError> {
	match &args.config {
		Some(path) => helpdesk_server_config::load_config_with_file(path),
		None => helpdesk_server_config::load_config(),
	}
}

fn print_roles() {
	for role in RoleRegistry::canonical().roles() {
		let p = &role.permissions;
		println!("{} ({})", role.id, role.display_name);
		println!("  view all tickets:  {}", p.can_view_all_tickets);
		println!("  view own tickets:  {}", p.can_view_own_tickets);
		println!("  edit all tickets:  {}", p.can_edit_all_tickets);
		println!("  edit own tickets:  {}", p.can_edit_own_tickets);
		println!("  create tickets:    {}", p.can_create_tickets);
		println!("  delete tickets:    {}", p.can_delete_tickets);
		println!("  manage users:      {}", p.can_manage_users);
		println!("  view reports:      {}", p.can_view_reports);
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Roles) = args.command {
		print_roles();
		return Ok(());
	}

	dotenvy::dotenv().ok();

	let config = load_config(&args)?;

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting helpdesk-server"
	);

	let pool = helpdesk_server_db::create_pool(&config.database.url).await?;
	helpdesk_server_db::run_migrations(&pool).await?;

	if let Some(Command::Migrate) = args.command {
		tracing::info!("migrations applied");
		return Ok(());
	}

	let state = create_app_state(pool, &config);
	let app = create_router(state);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
