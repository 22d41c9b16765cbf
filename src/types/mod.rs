// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types consumed by the readiness waits.

pub mod certificate;
pub mod condition;
pub mod secret_store;

pub use certificate::Certificate;
pub use condition::{HasReadyCondition, StatusCondition};
pub use secret_store::ClusterSecretStore;
