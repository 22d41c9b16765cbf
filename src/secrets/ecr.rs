// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ECR image-pull token synchronization.
//!
//! ECR authorization tokens expire after 12 hours, so this runs on a
//! schedule (e.g. a CronJob) and rewrites the docker-config secret with a
//! freshly issued token on every invocation.

use crate::constants::secrets::{DOCKER_CONFIG_KEY, ECR_SECRET_NAME};
use crate::error::{Result, ToolkitError};
use aws_config::{BehaviorVersion, Region};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::{Api, ObjectMeta, PostParams};
use kube::Client;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

/// Fetch a fresh authorization token from ECR. The returned value is the
/// base64 `user:password` pair as issued, ready for the dockerconfig `auth`
/// field.
async fn fetch_ecr_token(region: &str) -> Result<String> {
    info!("getting ecr auth token");
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;
    let ecr = aws_sdk_ecr::Client::new(&config);

    let output = ecr
        .get_authorization_token()
        .send()
        .await
        .map_err(|e| ToolkitError::Aws(format!("getting ecr authorization token: {e}")))?;

    output
        .authorization_data()
        .first()
        .and_then(|d| d.authorization_token().map(String::from))
        .ok_or_else(|| ToolkitError::Aws("ecr response contained no authorization data".to_string()))
}

/// Render the docker-config secret holding the registry credentials.
pub fn build_docker_config_secret(namespace: &str, registry_url: &str, token: &str) -> Secret {
    let docker_config = serde_json::json!({
        "auths": { registry_url: { "auth": token } }
    })
    .to_string();

    Secret {
        metadata: ObjectMeta {
            name: Some(ECR_SECRET_NAME.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(
            DOCKER_CONFIG_KEY.to_string(),
            ByteString(docker_config.into_bytes()),
        )])),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

/// Retrieve a new ECR token and create or update the in-cluster secret
/// containing it.
#[instrument(skip(client))]
pub async fn sync_ecr_token_secret(
    client: &Client,
    namespace: &str,
    region: &str,
    registry_url: &str,
) -> Result<()> {
    let token = fetch_ecr_token(region).await?;
    info!("using ecr registry url: {registry_url}");

    let secret = build_docker_config_secret(namespace, registry_url, &token);
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    match secrets.get(ECR_SECRET_NAME).await {
        Ok(existing) => {
            info!(
                "secret {namespace}/{ECR_SECRET_NAME} already exists, it will be updated"
            );
            let mut replacement = secret;
            // Carry the resourceVersion so the replace is not rejected.
            replacement.metadata.resource_version = existing.metadata.resource_version;
            secrets
                .replace(ECR_SECRET_NAME, &PostParams::default(), &replacement)
                .await?;
            info!("updated secret {namespace}/{ECR_SECRET_NAME} with new ecr token");
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            warn!("secret {namespace}/{ECR_SECRET_NAME} does not exist, it will be created");
            secrets.create(&PostParams::default(), &secret).await?;
            info!("created secret {namespace}/{ECR_SECRET_NAME} with new ecr token");
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
