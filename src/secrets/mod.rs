// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Credential secret synchronization.

pub mod ecr;
pub mod token;

pub use ecr::sync_ecr_token_secret;
pub use token::ensure_access_token_secret;
