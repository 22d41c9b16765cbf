// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-if-absent access token secrets.

use crate::constants::secrets::{ACCESS_TOKEN_KEY, ACCESS_TOKEN_LEN};
use crate::error::Result;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::{Api, ObjectMeta, PostParams};
use kube::Client;
use rand::distr::Alphanumeric;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// Generate a random alphanumeric token.
pub fn generate_access_token(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Build the access token secret for a namespace.
pub fn build_access_token_secret(namespace: &str, name: &str, token: &str) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(
            ACCESS_TOKEN_KEY.to_string(),
            ByteString(token.as_bytes().to_vec()),
        )])),
        ..Default::default()
    }
}

/// Create the access token secret if it does not already exist. An existing
/// secret is left untouched so that a token issued earlier stays valid.
#[instrument(skip(client))]
pub async fn ensure_access_token_secret(client: &Client, namespace: &str, name: &str) -> Result<()> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);

    match secrets.get(name).await {
        Ok(_) => {
            info!("kubernetes secret {namespace}/{name} already created - skipping");
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            let token = generate_access_token(ACCESS_TOKEN_LEN);
            let secret = build_access_token_secret(namespace, name, &token);
            secrets.create(&PostParams::default(), &secret).await?;
            info!("created kubernetes secret: {namespace}/{name}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
