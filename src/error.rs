// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("invalid label '{0}': expected the form key=value")]
    InvalidLabel(String),

    #[error("Failed to load cluster configuration: {0}")]
    Kubeconfig(String),

    #[error("watch failure: {0}")]
    Watch(String),

    #[error("{0}")]
    Timeout(String),

    #[error("no matching resource: {0}")]
    NotFound(String),

    #[error("AWS API error: {0}")]
    Aws(String),

    #[error("object storage error: {0}")]
    ObjectStorage(String),
}

pub type Result<T> = std::result::Result<T, ToolkitError>;
