// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod decisions;
pub mod health;
pub mod tasks;
pub mod tickets;
