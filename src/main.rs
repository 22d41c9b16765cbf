// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use std::time::Duration;

use kube_toolkit::cli::{CommandRoot, ToolkitSubcommand, WaitForSubcommand};
use kube_toolkit::constants::minio;
use kube_toolkit::kubernetes::create_client;
use kube_toolkit::secrets::{ensure_access_token_secret, sync_ecr_token_secret};
use kube_toolkit::selector::Selector;
use kube_toolkit::wait::{
    find_deployment, find_pod, find_statefulset, wait_certificate_ready,
    wait_cluster_secret_store_ready, wait_deployment_ready, wait_for_buckets, wait_pod_ready,
    wait_statefulset_ready, wait_vault_init_complete, wait_vault_unseal, MinioProbe, VaultProbe,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let root = CommandRoot::parse();

    match root.subcommand {
        ToolkitSubcommand::WaitFor(subcommand) => match subcommand {
            WaitForSubcommand::Deployment(args) => {
                let selector = Selector::parse(&args.label)?;
                let timeout = Duration::from_secs(args.timeout_seconds);
                let client = create_client(args.use_kubeconfig_in_cluster).await?;
                let deployment =
                    find_deployment(&client, &args.namespace, &selector, timeout).await?;
                wait_deployment_ready(&client, &deployment, timeout).await?;
            }
            WaitForSubcommand::Pod(args) => {
                let selector = Selector::parse(&args.label)?;
                let timeout = Duration::from_secs(args.timeout_seconds);
                let client = create_client(args.use_kubeconfig_in_cluster).await?;
                let pod = find_pod(&client, &args.namespace, &selector, timeout).await?;
                wait_pod_ready(&client, &pod, timeout).await?;
            }
            WaitForSubcommand::Statefulset(args) => {
                let selector = Selector::parse(&args.label)?;
                let timeout = Duration::from_secs(args.timeout_seconds);
                let client = create_client(args.use_kubeconfig_in_cluster).await?;
                let statefulset =
                    find_statefulset(&client, &args.namespace, &selector, timeout).await?;
                wait_statefulset_ready(&client, &statefulset, timeout, args.ignore_ready).await?;
            }
            WaitForSubcommand::Certificate(args) => {
                let timeout = Duration::from_secs(args.timeout_seconds);
                let client = create_client(args.use_kubeconfig_in_cluster).await?;
                wait_certificate_ready(&client, &args.namespace, &args.name, timeout).await?;
            }
            WaitForSubcommand::ClusterSecretStore(args) => {
                let timeout = Duration::from_secs(args.timeout_seconds);
                let client = create_client(args.use_kubeconfig_in_cluster).await?;
                wait_cluster_secret_store_ready(&client, &args.name, timeout).await?;
            }
            WaitForSubcommand::MinioBuckets(args) => {
                let probe = MinioProbe::new();
                let timeout = Duration::from_secs(args.timeout_seconds);
                wait_for_buckets(&probe, &minio::REQUIRED_BUCKETS, timeout).await?;
            }
            WaitForSubcommand::VaultUnseal(args) => {
                let timeout = Duration::from_secs(args.timeout_seconds);
                let client = create_client(args.use_kubeconfig_in_cluster).await?;
                wait_vault_unseal(&client, timeout).await?;
            }
            WaitForSubcommand::VaultInitComplete(args) => {
                let probe = VaultProbe::new();
                let timeout = Duration::from_secs(args.timeout_seconds);
                wait_vault_init_complete(&probe, timeout).await?;
            }
        },
        ToolkitSubcommand::SyncEcrToken(args) => {
            let client = create_client(args.use_kubeconfig_in_cluster).await?;
            sync_ecr_token_secret(&client, &args.namespace, &args.region, &args.registry_url)
                .await?;
        }
        ToolkitSubcommand::CreateK8sSecret(args) => {
            let client = create_client(args.use_kubeconfig_in_cluster).await?;
            ensure_access_token_secret(&client, &args.namespace, &args.name).await?;
        }
    }

    Ok(())
}
