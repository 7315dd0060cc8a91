// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelParseError {
	#[error("invalid ticket status: {0}")]
	InvalidStatus(String),

	#[error("invalid attention type: {0}")]
	InvalidAttentionType(String),

	#[error("invalid task status: {0}")]
	InvalidTaskStatus(String),

	#[error("invalid task ID: {0}")]
	InvalidTaskId(#[from] uuid::Error),
}
