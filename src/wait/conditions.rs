// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Readiness waits for condition-bearing custom resources.

use crate::error::{Result, ToolkitError};
use crate::types::{Certificate, ClusterSecretStore, HasReadyCondition};
use crate::wait::engine::{drain_until, Verdict};
use futures::StreamExt;
use kube::api::{Api, WatchParams};
use kube::Client;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{info, instrument};

/// Wait for a cert-manager Certificate to report a Ready condition.
#[instrument(skip(client))]
pub async fn wait_certificate_ready(
    client: &Client,
    namespace: &str,
    name: &str,
    timeout: Duration,
) -> Result<()> {
    let api: Api<Certificate> = Api::namespaced(client.clone(), namespace);
    info!("waiting for Certificate {name}");
    wait_condition_ready(&api, name, timeout, "Certificate").await?;
    info!("Certificate validated");
    Ok(())
}

/// Wait for an external-secrets ClusterSecretStore to report a Ready
/// condition.
#[instrument(skip(client))]
pub async fn wait_cluster_secret_store_ready(
    client: &Client,
    name: &str,
    timeout: Duration,
) -> Result<()> {
    let api: Api<ClusterSecretStore> = Api::all(client.clone());
    info!("waiting for ClusterSecretStore {name}");
    wait_condition_ready(&api, name, timeout, "ClusterSecretStore").await?;
    info!("ClusterSecretStore validated");
    Ok(())
}

/// Watch the named object until some condition has type Ready and status
/// True. While pending, the most recent non-Ready condition is retained and
/// reported if the deadline is hit.
async fn wait_condition_ready<K>(
    api: &Api<K>,
    name: &str,
    timeout: Duration,
    kind: &str,
) -> Result<()>
where
    K: Clone + DeserializeOwned + Debug + HasReadyCondition,
{
    let wp = WatchParams::default().fields(&format!("metadata.name={name}"));
    let events = api.watch(&wp, "0").await?.boxed();

    let mut last_condition: Option<String> = None;
    let verdict = drain_until(
        events,
        |obj: &K| {
            if obj.is_ready() {
                Some(())
            } else {
                if let Some(reason) = obj.pending_reason() {
                    last_condition = Some(reason);
                }
                None
            }
        },
        timeout,
        &format!("{kind} {name}"),
    )
    .await?;

    match verdict {
        Verdict::Ready(()) => Ok(()),
        Verdict::TimedOut => {
            let detail = last_condition
                .map(|c| format!(": {c}"))
                .unwrap_or_default();
            Err(ToolkitError::Timeout(format!(
                "timed out waiting for the {kind} {name} to be ready{detail}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{certificate_json, secret_store_json, watch_body, MockService};

    const NS_CERTIFICATES: &str = "/apis/cert-manager.io/v1/namespaces/argocd/certificates";
    const CLUSTER_STORES: &str = "/apis/external-secrets.io/v1beta1/clustersecretstores";

    #[tokio::test]
    async fn test_certificate_becomes_ready() {
        let client = MockService::new()
            .on_get_query(
                NS_CERTIFICATES,
                "watch=true",
                200,
                &watch_body(&[
                    (
                        "ADDED",
                        certificate_json("tls-cert", "argocd", "False", "InProgress", "pending"),
                    ),
                    (
                        "MODIFIED",
                        certificate_json("tls-cert", "argocd", "True", "Issued", "ok"),
                    ),
                ]),
            )
            .into_client();

        wait_certificate_ready(&client, "argocd", "tls-cert", Duration::from_secs(5))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_certificate_watch_closing_while_pending_is_fatal() {
        let client = MockService::new()
            .on_get_query(
                NS_CERTIFICATES,
                "watch=true",
                200,
                &watch_body(&[(
                    "ADDED",
                    certificate_json(
                        "tls-cert",
                        "argocd",
                        "False",
                        "DoesNotExist",
                        "issuer not found",
                    ),
                )]),
            )
            .into_client();

        // The body ends after the pending event, closing the stream before
        // the certificate ever reports Ready.
        let err = wait_certificate_ready(&client, "argocd", "tls-cert", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolkitError::Watch(_)));
    }

    #[tokio::test]
    async fn test_timeout_carries_retained_condition() {
        use crate::types::certificate::{Certificate, CertificateSpec, CertificateStatus};
        use crate::types::StatusCondition;
        use futures::stream;
        use kube::api::{ObjectMeta, WatchEvent};

        let pending = Certificate {
            metadata: ObjectMeta {
                name: Some("tls-cert".to_string()),
                namespace: Some("argocd".to_string()),
                ..Default::default()
            },
            spec: CertificateSpec {
                secret_name: None,
                dns_names: None,
                issuer_ref: None,
            },
            status: Some(CertificateStatus {
                conditions: Some(vec![StatusCondition {
                    condition_type: "Ready".to_string(),
                    status: "False".to_string(),
                    reason: Some("DoesNotExist".to_string()),
                    message: Some("issuer not found".to_string()),
                }]),
                not_after: None,
            }),
        };

        let events = stream::iter(vec![Ok(WatchEvent::Added(pending))]).chain(stream::pending());

        let mut last_condition: Option<String> = None;
        let verdict = drain_until(
            events,
            |cert: &Certificate| {
                if cert.is_ready() {
                    Some(())
                } else {
                    last_condition = cert.pending_reason();
                    None
                }
            },
            Duration::from_millis(50),
            "Certificate tls-cert",
        )
        .await
        .unwrap();

        assert_eq!(verdict, Verdict::TimedOut);
        assert_eq!(
            last_condition.unwrap(),
            "DoesNotExist: issuer not found"
        );
    }

    #[tokio::test]
    async fn test_cluster_secret_store_becomes_ready() {
        let client = MockService::new()
            .on_get_query(
                CLUSTER_STORES,
                "watch=true",
                200,
                &watch_body(&[(
                    "MODIFIED",
                    secret_store_json("vault-kv-secret", "True", "Valid", "store validated"),
                )]),
            )
            .into_client();

        wait_cluster_secret_store_ready(&client, "vault-kv-secret", Duration::from_secs(5))
            .await
            .unwrap();
    }
}
