// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access control for the helpdesk.
//!
//! - [`roles`]: the fixed role table and its permission flags
//! - [`matcher`]: decides whether an actor "is" the agent recorded on a ticket
//! - [`abac`]: the permission evaluator and the visibility filter for lists
//!
//! Everything here is pure. Decisions never touch storage and never mutate the
//! actor or the resource, so the same inputs always produce the same answer.

pub mod abac;
pub mod actor;
pub mod error;
pub mod matcher;
pub mod roles;

pub use abac::{filter_visible, Action, Decision, PermissionEvaluator};
pub use actor::Actor;
pub use error::AuthError;
pub use matcher::{MatchMode, NameMatcher, OwnershipMatch};
pub use roles::{Permissions, Role, RoleId, RoleRegistry};
