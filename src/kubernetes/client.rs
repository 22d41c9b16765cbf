// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation for in-cluster and external invocations.

use crate::error::{Result, ToolkitError};
use kube::{Client, Config};
use tracing::debug;

/// Create a Kubernetes client, either from the in-cluster service account
/// or from the local kubeconfig environment.
pub async fn create_client(in_cluster: bool) -> Result<Client> {
    let config = if in_cluster {
        debug!("using in-cluster service account configuration");
        Config::incluster()
            .map_err(|e| ToolkitError::Kubeconfig(format!("in-cluster config unavailable: {e}")))?
    } else {
        debug!("inferring configuration from the local environment");
        Config::infer()
            .await
            .map_err(|e| ToolkitError::Kubeconfig(format!("could not infer kubeconfig: {e}")))?
    };

    Client::try_from(config)
        .map_err(|e| ToolkitError::Kubeconfig(format!("failed to create client: {e}")))
}
