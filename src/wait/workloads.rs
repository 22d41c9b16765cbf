// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Discovery and readiness waits for Deployments, Pods and StatefulSets.
//!
//! Waiting is two-phase: a label-scoped watch first resolves the selector to
//! one concrete object (tracking a label set whose membership can change is
//! deliberately avoided), then a name-scoped watch tracks that object until
//! its readiness predicate holds.

use crate::constants::REVISION_HASH_LABEL;
use crate::error::{Result, ToolkitError};
use crate::selector::Selector;
use crate::wait::engine::{drain_until, Verdict};
use futures::StreamExt;
use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams, WatchParams};
use kube::{Client, ResourceExt};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument};

/// Watch by label until one matching object reaches its first-appearance
/// milestone, then list with the same selector and return the first item.
/// The event snapshot is never returned directly; the fresh read avoids a
/// race between watch delivery and the authoritative store.
async fn discover<K, F>(
    api: &Api<K>,
    selector: &Selector,
    timeout: Duration,
    kind: &str,
    mut milestone: F,
) -> Result<K>
where
    K: Clone + DeserializeOwned + Debug,
    F: FnMut(&K) -> bool,
{
    let wp = WatchParams::default().labels(&selector.to_string());
    let events = api.watch(&wp, "0").await?.boxed();
    let what = format!("{kind} with label {selector}");

    match drain_until(events, |obj: &K| milestone(obj).then_some(()), timeout, &what).await? {
        Verdict::Ready(()) => {
            let lp = ListParams::default().labels(&selector.to_string());
            let list = api.list(&lp).await?;
            list.items
                .into_iter()
                .next()
                .ok_or_else(|| ToolkitError::NotFound(what))
        }
        Verdict::TimedOut => Err(ToolkitError::Timeout(format!(
            "the {kind} was not created within the timeout period (label {selector})"
        ))),
    }
}

/// Return the first Deployment matching the label once it reports at least
/// one replica.
#[instrument(skip(client))]
pub async fn find_deployment(
    client: &Client,
    namespace: &str,
    selector: &Selector,
    timeout: Duration,
) -> Result<Deployment> {
    let api: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    info!("waiting for {} Deployment to be created", selector.value);

    discover(&api, selector, timeout, "Deployment", |d: &Deployment| {
        d.status.as_ref().and_then(|s| s.replicas).unwrap_or(0) > 0
    })
    .await
}

/// Return the first Pod matching the label once it reports a Pending or
/// Running phase.
#[instrument(skip(client))]
pub async fn find_pod(
    client: &Client,
    namespace: &str,
    selector: &Selector,
    timeout: Duration,
) -> Result<Pod> {
    let api: Api<Pod> = Api::namespaced(client.clone(), namespace);
    info!("waiting for {} Pod to be created", selector.value);

    discover(&api, selector, timeout, "Pod", |p: &Pod| {
        matches!(
            p.status.as_ref().and_then(|s| s.phase.as_deref()),
            Some("Pending") | Some("Running")
        )
    })
    .await
}

/// Return the first StatefulSet matching the label once it reports at least
/// one replica.
#[instrument(skip(client))]
pub async fn find_statefulset(
    client: &Client,
    namespace: &str,
    selector: &Selector,
    timeout: Duration,
) -> Result<StatefulSet> {
    let api: Api<StatefulSet> = Api::namespaced(client.clone(), namespace);
    info!("waiting for {} StatefulSet to be created", selector.value);

    discover(&api, selector, timeout, "StatefulSet", |s: &StatefulSet| {
        s.status.as_ref().map(|s| s.replicas).unwrap_or(0) > 0
    })
    .await
}

/// Wait for every Pod in the Deployment to be ready. The desired replica
/// count is captured once from the discovered object; a live edit mid-wait
/// is not re-read.
#[instrument(skip(client, deployment), fields(deployment = %deployment.name_any()))]
pub async fn wait_deployment_ready(
    client: &Client,
    deployment: &Deployment,
    timeout: Duration,
) -> Result<()> {
    let name = deployment.name_any();
    let namespace = deployment.namespace().unwrap_or_default();
    let desired = deployment.status.as_ref().and_then(|s| s.replicas).unwrap_or(0);

    let api: Api<Deployment> = Api::namespaced(client.clone(), &namespace);
    let wp = WatchParams::default().fields(&format!("metadata.name={name}"));
    let events = api.watch(&wp, "0").await?.boxed();

    info!(
        "waiting for {} Deployment to be ready - this could take up to {} seconds",
        name,
        timeout.as_secs()
    );

    let verdict = drain_until(
        events,
        |d: &Deployment| {
            (d.status.as_ref().and_then(|s| s.ready_replicas).unwrap_or(0) == desired)
                .then_some(())
        },
        timeout,
        &format!("Deployment {namespace}/{name}"),
    )
    .await?;

    match verdict {
        Verdict::Ready(()) => {
            info!("all Pods in Deployment {name} are ready");
            Ok(())
        }
        Verdict::TimedOut => Err(ToolkitError::Timeout(format!(
            "the Deployment {namespace}/{name} was not ready within the timeout period"
        ))),
    }
}

/// Wait for the Pod to reach the Running phase.
#[instrument(skip(client, pod), fields(pod = %pod.name_any()))]
pub async fn wait_pod_ready(client: &Client, pod: &Pod, timeout: Duration) -> Result<()> {
    let name = pod.name_any();
    let namespace = pod.namespace().unwrap_or_default();

    let api: Api<Pod> = Api::namespaced(client.clone(), &namespace);
    let wp = WatchParams::default().fields(&format!("metadata.name={name}"));
    let events = api.watch(&wp, "0").await?.boxed();

    info!(
        "waiting for {} Pod to be ready - this could take up to {} seconds",
        name,
        timeout.as_secs()
    );

    let verdict = drain_until(
        events,
        |p: &Pod| {
            (p.status.as_ref().and_then(|s| s.phase.as_deref()) == Some("Running")).then_some(())
        },
        timeout,
        &format!("Pod {namespace}/{name}"),
    )
    .await?;

    match verdict {
        Verdict::Ready(()) => {
            info!("Pod {name} is Running");
            Ok(())
        }
        Verdict::TimedOut => Err(ToolkitError::Timeout(format!(
            "the operation timed out while waiting for Pod {namespace}/{name} to become ready"
        ))),
    }
}

/// Wait for the StatefulSet to be ready.
///
/// With `ignore_ready` false, readiness is the aggregate count:
/// `availableReplicas` matching the desired count captured at watch-open
/// time. With `ignore_ready` true (for workloads whose Pods run long before
/// they report ready), the aggregate `currentReplicas` milestone cascades
/// into a per-Pod Running wait over the Pods owned by the current revision.
/// Each cascaded wait shares the parent's remaining budget rather than
/// starting a fresh timeout.
#[instrument(skip(client, statefulset), fields(statefulset = %statefulset.name_any()))]
pub async fn wait_statefulset_ready(
    client: &Client,
    statefulset: &StatefulSet,
    timeout: Duration,
    ignore_ready: bool,
) -> Result<()> {
    let name = statefulset.name_any();
    let namespace = statefulset.namespace().unwrap_or_default();
    let desired = statefulset.status.as_ref().map(|s| s.replicas).unwrap_or(0);
    let deadline = Instant::now() + timeout;

    let api: Api<StatefulSet> = Api::namespaced(client.clone(), &namespace);
    let wp = WatchParams::default().fields(&format!("metadata.name={name}"));
    let events = api.watch(&wp, "0").await?.boxed();

    info!(
        "waiting for {} StatefulSet to be ready - this could take up to {} seconds",
        name,
        timeout.as_secs()
    );

    if ignore_ready {
        let what = format!("StatefulSet {namespace}/{name}");
        let verdict = drain_until(
            events,
            |s: &StatefulSet| {
                let status = s.status.as_ref()?;
                (status.current_replicas.unwrap_or(0) == desired)
                    .then(|| status.current_revision.clone())
                    .flatten()
            },
            timeout,
            &what,
        )
        .await?;

        let revision = match verdict {
            Verdict::Ready(revision) => revision,
            Verdict::TimedOut => {
                return Err(ToolkitError::Timeout(format!(
                    "the StatefulSet {namespace}/{name} was not ready within the timeout period"
                )))
            }
        };

        // All Pods of the current revision must independently reach Running.
        let pods: Api<Pod> = Api::namespaced(client.clone(), &namespace);
        let lp = ListParams::default().labels(&format!("{REVISION_HASH_LABEL}={revision}"));
        let owned = pods.list(&lp).await?;

        for pod in &owned.items {
            let remaining = deadline.saturating_duration_since(Instant::now());
            wait_pod_ready(client, pod, remaining).await?;
            info!(
                "pod {} in statefulset {} is running",
                pod.name_any(),
                name
            );
        }
        Ok(())
    } else {
        let verdict = drain_until(
            events,
            |s: &StatefulSet| {
                (s.status.as_ref().and_then(|st| st.available_replicas).unwrap_or(0) == desired)
                    .then_some(())
            },
            timeout,
            &format!("StatefulSet {namespace}/{name}"),
        )
        .await?;

        match verdict {
            Verdict::Ready(()) => {
                info!("all Pods in StatefulSet {name} are ready");
                Ok(())
            }
            Verdict::TimedOut => Err(ToolkitError::Timeout(format!(
                "the StatefulSet {namespace}/{name} was not ready within the timeout period"
            ))),
        }
    }
}
