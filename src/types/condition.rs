// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use serde::{Deserialize, Serialize};

/// A status condition as reported by condition-bearing custom resources
/// (cert-manager Certificates, external-secrets ClusterSecretStores).
#[derive(Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCondition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusCondition {
    pub fn is_ready(&self) -> bool {
        self.condition_type == "Ready" && self.status == "True"
    }

    /// Human-readable summary used when a wait times out
    pub fn describe(&self) -> String {
        format!(
            "{}: {}",
            self.reason.as_deref().unwrap_or("Unknown"),
            self.message.as_deref().unwrap_or("")
        )
    }
}

/// Readiness based on a `Ready` status condition.
pub trait HasReadyCondition {
    fn conditions(&self) -> Option<&[StatusCondition]>;

    fn is_ready(&self) -> bool {
        self.conditions()
            .is_some_and(|conditions| conditions.iter().any(StatusCondition::is_ready))
    }

    /// The most recent non-Ready condition, kept as the failure explanation
    /// if the deadline is hit.
    fn pending_reason(&self) -> Option<String> {
        self.conditions()?
            .iter()
            .filter(|c| !c.is_ready())
            .next_back()
            .map(StatusCondition::describe)
    }
}
