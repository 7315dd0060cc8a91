// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite persistence for the helpdesk.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod task;
pub mod testing;
pub mod ticket;

pub use error::{DbError, Result};
pub use migrations::run_migrations;
pub use pool::create_pool;
pub use task::{TaskRepository, TaskStore};
pub use ticket::{TicketRepository, TicketStore};
