// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared helpdesk domain types.
//!
//! Tickets have no surrogate key. A row is located by its business fields
//! (requester, request text, category, agent, area, site), optionally pinned
//! to the creation timestamp. [`identity`] owns that natural key and the
//! NULL/empty-string equivalence it relies on; the record store only renders
//! an [`IdentityPredicate`] into its own query language.

pub mod error;
pub mod identity;
pub mod model;
pub mod patch;
pub mod task;

pub use error::*;
pub use identity::*;
pub use model::*;
pub use patch::*;
pub use task::*;
