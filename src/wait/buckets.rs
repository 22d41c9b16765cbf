// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval existence polling for the bootstrap bucket set.
//!
//! There is no change-event stream for buckets, so this is a plain poll
//! against the object-storage control API: every pass checks each required
//! bucket, and the wait ends when all of them exist within a single pass.

use crate::constants::minio;
use crate::error::{Result, ToolkitError};
use async_trait::async_trait;
use std::env;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Existence probe against an object-storage control API. A `false` result
/// means the bucket does not exist yet and the caller keeps polling; any
/// error is a transport failure and immediately fatal.
#[async_trait]
pub trait BucketProbe {
    async fn bucket_exists(&self, name: &str) -> Result<bool>;
}

/// S3-compatible probe for the in-cluster MinIO deployment.
pub struct MinioProbe {
    client: aws_sdk_s3::Client,
}

impl MinioProbe {
    pub fn new() -> Self {
        let access_key = env::var(minio::ACCESS_KEY_ENV)
            .unwrap_or_else(|_| minio::DEFAULT_ACCESS_KEY.to_string());
        let secret_key = env::var(minio::SECRET_KEY_ENV)
            .unwrap_or_else(|_| minio::DEFAULT_SECRET_KEY.to_string());
        let credentials =
            aws_sdk_s3::config::Credentials::new(access_key, secret_key, None, None, "minio");

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(minio::REGION))
            .endpoint_url(minio::ENDPOINT)
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        MinioProbe {
            client: aws_sdk_s3::Client::from_conf(config),
        }
    }
}

impl Default for MinioProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BucketProbe for MinioProbe {
    async fn bucket_exists(&self, name: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(ToolkitError::ObjectStorage(format!(
                        "checking existence of bucket {name}: {service_err}"
                    )))
                }
            }
        }
    }
}

/// Poll until every named bucket exists in the same pass, checking every
/// `POLL_INTERVAL_SECS`. Bounded by `timeout`, unlike the event-driven
/// waits this does not distinguish which bucket was still missing beyond
/// the log line.
pub async fn wait_for_buckets<P: BucketProbe>(
    probe: &P,
    buckets: &[&str],
    timeout: Duration,
) -> Result<()> {
    let deadline = Instant::now() + timeout;

    loop {
        let mut all_exist = true;
        for bucket in buckets {
            if !probe.bucket_exists(bucket).await? {
                debug!("bucket {bucket} does not exist yet");
                all_exist = false;
                break;
            }
        }

        if all_exist {
            info!("all required buckets exist");
            return Ok(());
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Err(ToolkitError::Timeout(
                "timed out waiting for all required buckets to exist".to_string(),
            ));
        }

        info!("waiting for all buckets to exist...");
        sleep(remaining.min(Duration::from_secs(minio::POLL_INTERVAL_SECS))).await;
    }
}
