// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Polls for the two Vault bootstrap milestones: the unseal job writing its
//! root token secret, and the terraform apply hydrating the first KV entry.

use crate::constants::vault;
use crate::error::{Result, ToolkitError};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::api::Api;
use kube::Client;
use std::env;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument};

fn has_root_token(secret: &Secret) -> bool {
    secret
        .data
        .as_ref()
        .and_then(|data| data.get(vault::ROOT_TOKEN_KEY))
        .is_some_and(|token| !token.0.is_empty())
}

/// Poll the unseal secret until it carries a non-empty root token. A missing
/// secret just means the unseal job has not finished; any other API failure
/// is fatal.
#[instrument(skip(client))]
pub async fn wait_vault_unseal(client: &Client, timeout: Duration) -> Result<()> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), vault::NAMESPACE);
    let deadline = Instant::now() + timeout;

    loop {
        match secrets.get(vault::UNSEAL_SECRET_NAME).await {
            Ok(secret) if has_root_token(&secret) => {
                info!("vault successfully unsealed");
                return Ok(());
            }
            Ok(_) => debug!("unseal secret exists but carries no root token yet"),
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("unseal secret does not exist yet");
            }
            Err(e) => return Err(e.into()),
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ToolkitError::Timeout(
                "timed out waiting for vault to be unsealed".to_string(),
            ));
        }
        info!("waiting for vault to be unsealed...");
        sleep(remaining.min(Duration::from_secs(vault::POLL_INTERVAL_SECS))).await;
    }
}

/// Probe for the KV entry the bootstrap terraform apply writes last. A
/// `false` result keeps the poll going; errors are transport failures and
/// immediately fatal.
#[async_trait]
pub trait HydrationProbe {
    async fn hydrated(&self) -> Result<bool>;
}

/// HTTP probe against the in-cluster Vault KV API. An unreachable server or
/// a non-success status reads as not hydrated yet, since Vault is routinely
/// still sealed or booting when this runs.
pub struct VaultProbe {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl VaultProbe {
    pub fn new() -> Self {
        VaultProbe {
            http: reqwest::Client::new(),
            url: format!("{}/{}", vault::ADDR, vault::HYDRATION_SECRET_PATH),
            token: env::var(vault::TOKEN_ENV).unwrap_or_default(),
        }
    }
}

impl Default for VaultProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HydrationProbe for VaultProbe {
    async fn hydrated(&self) -> Result<bool> {
        let response = self
            .http
            .get(&self.url)
            .header("X-Vault-Token", &self.token)
            .send()
            .await;

        match response {
            Ok(r) if r.status().is_success() => Ok(true),
            Ok(r) => {
                debug!("vault read returned status {}", r.status());
                Ok(false)
            }
            Err(e) => {
                debug!("vault not reachable yet: {e}");
                Ok(false)
            }
        }
    }
}

/// Poll until the hydration KV entry is readable, checking every
/// `POLL_INTERVAL_SECS`, bounded by `timeout`.
#[instrument(skip(probe))]
pub async fn wait_vault_init_complete<P: HydrationProbe>(
    probe: &P,
    timeout: Duration,
) -> Result<()> {
    let deadline = Instant::now() + timeout;

    loop {
        if probe.hydrated().await? {
            info!("vault successfully hydrated");
            return Ok(());
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ToolkitError::Timeout(
                "timed out waiting for the vault terraform apply to complete".to_string(),
            ));
        }
        info!("waiting for the vault terraform apply to complete...");
        sleep(remaining.min(Duration::from_secs(vault::POLL_INTERVAL_SECS))).await;
    }
}
