// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ticket mutation service.
//!
//! Every write goes through the same stages: validate the payload, ask the
//! [`PermissionEvaluator`](helpdesk_server_auth::PermissionEvaluator), build the
//! identity predicate, then issue exactly one store call. Validation and
//! authorization failures never reach the store, and nothing is retried.

pub mod error;
pub mod request;
pub mod service;
pub mod sites;
pub mod tasks;
pub mod validation;

pub use error::{Result, TicketError};
pub use request::{NewTask, NewTicket, TicketUpdate};
pub use service::TicketService;
pub use sites::SiteRules;
pub use tasks::TaskService;
