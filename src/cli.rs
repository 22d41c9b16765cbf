// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command-line surface. Each subcommand parses into its own immutable
//! args struct; nothing here is shared mutable state.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    about = "operational toolkit for waiting on cluster resources and syncing credentials",
    version,
    propagate_version = true
)]
pub struct CommandRoot {
    #[command(subcommand)]
    pub subcommand: ToolkitSubcommand,
}

#[derive(Subcommand)]
pub enum ToolkitSubcommand {
    /// Wait for a resource in Kubernetes to reach a ready state
    #[command(subcommand, name = "wait-for")]
    WaitFor(WaitForSubcommand),

    /// Retrieve a new ecr token and update an in-cluster secret containing the token
    SyncEcrToken(SyncEcrTokenArgs),

    /// Create a Kubernetes secret if it does not exist
    CreateK8sSecret(CreateSecretArgs),
}

#[derive(Subcommand)]
pub enum WaitForSubcommand {
    /// Wait for a Deployment to be ready
    Deployment(WaitWorkloadArgs),

    /// Wait for a Pod to be ready
    Pod(WaitWorkloadArgs),

    /// Wait for a StatefulSet to be ready
    Statefulset(WaitStatefulSetArgs),

    /// Wait for a cert-manager Certificate to be ready
    Certificate(WaitCertificateArgs),

    /// Wait for a ClusterSecretStore to be validated
    ClusterSecretStore(WaitSecretStoreArgs),

    /// Wait for all minio buckets to be created
    MinioBuckets(WaitBucketsArgs),

    /// Wait for vault to be unsealed
    VaultUnseal(WaitVaultArgs),

    /// Wait for vault to be configured with terraform
    VaultInitComplete(WaitVaultArgs),
}

#[derive(Args)]
pub struct WaitWorkloadArgs {
    /// Namespace containing the resource
    #[arg(long)]
    pub namespace: String,

    /// Label to select the resource in the form key=value
    #[arg(long)]
    pub label: String,

    /// Seconds to wait before giving up
    #[arg(long, default_value_t = 60)]
    pub timeout_seconds: u64,

    /// Kube config type - in-cluster (default), set to false to use local
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kubeconfig_in_cluster: bool,
}

#[derive(Args)]
pub struct WaitStatefulSetArgs {
    /// Namespace containing the resource
    #[arg(long)]
    pub namespace: String,

    /// Label to select the resource in the form key=value
    #[arg(long)]
    pub label: String,

    /// Only require owned Pods to be Running, not ready
    #[arg(long)]
    pub ignore_ready: bool,

    /// Seconds to wait before giving up
    #[arg(long, default_value_t = 60)]
    pub timeout_seconds: u64,

    /// Kube config type - in-cluster (default), set to false to use local
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kubeconfig_in_cluster: bool,
}

#[derive(Args)]
pub struct WaitCertificateArgs {
    /// Namespace containing the Certificate
    #[arg(long)]
    pub namespace: String,

    /// Name of the Certificate
    #[arg(long)]
    pub name: String,

    /// Seconds to wait before giving up
    #[arg(long, default_value_t = 60)]
    pub timeout_seconds: u64,

    /// Kube config type - in-cluster (default), set to false to use local
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kubeconfig_in_cluster: bool,
}

#[derive(Args)]
pub struct WaitSecretStoreArgs {
    /// Name of the ClusterSecretStore
    #[arg(long)]
    pub name: String,

    /// Seconds to wait before giving up
    #[arg(long, default_value_t = 60)]
    pub timeout_seconds: u64,

    /// Kube config type - in-cluster (default), set to false to use local
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kubeconfig_in_cluster: bool,
}

#[derive(Args)]
pub struct WaitBucketsArgs {
    /// Seconds to wait before giving up
    #[arg(long, default_value_t = 300)]
    pub timeout_seconds: u64,

    /// Kube config type - in-cluster (default), set to false to use local
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kubeconfig_in_cluster: bool,
}

#[derive(Args)]
pub struct WaitVaultArgs {
    /// Seconds to wait before giving up
    #[arg(long, default_value_t = 300)]
    pub timeout_seconds: u64,

    /// Kube config type - in-cluster (default), set to false to use local
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kubeconfig_in_cluster: bool,
}

#[derive(Args)]
pub struct SyncEcrTokenArgs {
    /// Kubernetes Namespace to create/sync in
    #[arg(long)]
    pub namespace: String,

    /// AWS Region
    #[arg(long)]
    pub region: String,

    /// ECR registry URL
    #[arg(long)]
    pub registry_url: String,

    /// Kube config type - in-cluster (default), set to false to use local
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kubeconfig_in_cluster: bool,
}

#[derive(Args)]
pub struct CreateSecretArgs {
    /// Kubernetes Namespace to create the secret in
    #[arg(long)]
    pub namespace: String,

    /// Secret name
    #[arg(long)]
    pub name: String,

    /// Kube config type - in-cluster (default), set to false to use local
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_kubeconfig_in_cluster: bool,
}
