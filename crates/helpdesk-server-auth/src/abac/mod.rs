// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission decisions for tickets and tasks.
//!
//! [`PermissionEvaluator::decide`] answers a single (actor, resource, action)
//! question; [`filter_visible`] applies the `view` rule to a whole list.

mod engine;
mod filter;
pub mod policies;
mod types;

pub use engine::PermissionEvaluator;
pub use filter::filter_visible;
pub use types::{Action, Decision};
