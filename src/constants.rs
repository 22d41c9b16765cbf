// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Label that ties Pods to the StatefulSet revision that owns them
pub const REVISION_HASH_LABEL: &str = "controller-revision-hash";

/// Fixed MinIO deployment details for the bootstrap environment
pub mod minio {
    /// In-cluster MinIO endpoint
    pub const ENDPOINT: &str = "http://minio.minio.svc.cluster.local:9000";
    pub const REGION: &str = "us-k3d-1";
    /// Environment variable overrides for the bootstrap credentials
    pub const ACCESS_KEY_ENV: &str = "MINIO_ROOT_USER";
    pub const SECRET_KEY_ENV: &str = "MINIO_ROOT_PASSWORD";
    pub const DEFAULT_ACCESS_KEY: &str = "k-ray";
    pub const DEFAULT_SECRET_KEY: &str = "feedkraystars";
    /// Buckets that must all exist before bootstrap can continue
    pub const REQUIRED_BUCKETS: [&str; 5] = [
        "chartmuseum",
        "argo-artifacts",
        "gitlab-backup",
        "kubefirst-state-store",
        "vault-backend",
    ];
    /// Seconds between existence checks
    pub const POLL_INTERVAL_SECS: u64 = 5;
}

/// Names and keys for synchronized credential secrets
pub mod secrets {
    /// Name of the image-pull token secret kept in sync with ECR
    pub const ECR_SECRET_NAME: &str = "docker-config";
    /// Data key holding the rendered docker config JSON
    pub const DOCKER_CONFIG_KEY: &str = "config.json";
    /// Data key holding the generated access token
    pub const ACCESS_TOKEN_KEY: &str = "K1_ACCESS_TOKEN";
    pub const ACCESS_TOKEN_LEN: usize = 20;
}

/// Fixed Vault deployment details for the bootstrap environment
pub mod vault {
    pub const NAMESPACE: &str = "vault";
    /// Secret written by the unseal job once vault is open
    pub const UNSEAL_SECRET_NAME: &str = "vault-unseal-secret";
    pub const ROOT_TOKEN_KEY: &str = "root-token";
    /// In-cluster Vault endpoint
    pub const ADDR: &str = "http://vault.vault.svc";
    pub const TOKEN_ENV: &str = "VAULT_TOKEN";
    /// KV entry written at the end of the bootstrap terraform apply
    pub const HYDRATION_SECRET_PATH: &str = "v1/secret/data/development/metaphor";
    /// Seconds between polls
    pub const POLL_INTERVAL_SECS: u64 = 5;
}
