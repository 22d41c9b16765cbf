// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Readiness waits: the event-driven waiter engine and the kind-specific
//! waits built on top of it.

pub mod buckets;
pub mod conditions;
pub mod engine;
pub mod vault;
pub mod workloads;

pub use buckets::{wait_for_buckets, BucketProbe, MinioProbe};
pub use conditions::{wait_certificate_ready, wait_cluster_secret_store_ready};
pub use engine::{drain_until, Verdict};
pub use vault::{wait_vault_init_complete, wait_vault_unseal, HydrationProbe, VaultProbe};
pub use workloads::{
    find_deployment, find_pod, find_statefulset, wait_deployment_ready, wait_pod_ready,
    wait_statefulset_ready,
};
