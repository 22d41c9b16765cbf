// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::condition::{HasReadyCondition, StatusCondition};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Cluster-scoped external-secrets store. Only the status conditions are
/// consumed here; the provider configuration is passed through untyped.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, schemars::JsonSchema)]
#[kube(
    group = "external-secrets.io",
    version = "v1beta1",
    kind = "ClusterSecretStore"
)]
#[kube(status = "ClusterSecretStoreStatus")]
#[serde(rename_all = "camelCase")]
pub struct ClusterSecretStoreSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSecretStoreStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<StatusCondition>>,
}

impl HasReadyCondition for ClusterSecretStore {
    fn conditions(&self) -> Option<&[StatusCondition]> {
        self.status.as_ref().and_then(|s| s.conditions.as_deref())
    }
}
