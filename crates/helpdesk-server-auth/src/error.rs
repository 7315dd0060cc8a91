// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
	#[error("forbidden: {0}")]
	Forbidden(String),

	#[error("invalid action: {0}")]
	InvalidAction(String),

	#[error("assign_agent requires a target agent")]
	MissingTargetAgent,
}

pub type Result<T> = std::result::Result<T, AuthError>;
