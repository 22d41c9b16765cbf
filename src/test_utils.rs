// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

#[derive(Clone)]
struct Route {
    method: String,
    path: String,
    /// Substring that must occur in the request query, used to tell watch
    /// requests apart from plain lists on the same path.
    query: Option<String>,
    status: u16,
    body: String,
}

/// A mock HTTP service that returns predefined responses based on request
/// paths.
#[derive(Clone)]
pub struct MockService {
    routes: Arc<Mutex<Vec<Route>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            routes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a response for GET requests matching the path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.add("GET", path, None, status, body)
    }

    /// Add a response for GET requests matching the path whose query string
    /// contains `query` (e.g. `watch=true`)
    pub fn on_get_query(self, path: &str, query: &str, status: u16, body: &str) -> Self {
        self.add("GET", path, Some(query), status, body)
    }

    /// Add a response for POST requests matching the path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.add("POST", path, None, status, body)
    }

    /// Add a response for PUT requests matching the path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.add("PUT", path, None, status, body)
    }

    fn add(self, method: &str, path: &str, query: Option<&str>, status: u16, body: &str) -> Self {
        self.routes.lock().unwrap().push(Route {
            method: method.to_string(),
            path: path.to_string(),
            query: query.map(String::from),
            status,
            body: body.to_string(),
        });
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str, query: &str) -> Option<(u16, String)> {
        let routes = self.routes.lock().unwrap();

        // Query-constrained routes take priority, so a watch route does not
        // shadow a list on the same path.
        for want_query in [true, false] {
            for route in routes.iter() {
                if route.method != method || route.query.is_some() != want_query {
                    continue;
                }
                let query_ok = route.query.as_ref().is_none_or(|q| query.contains(q.as_str()));
                if query_ok && (path == route.path || path.starts_with(&route.path)) {
                    return Some((route.status, route.body.clone()));
                }
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let query = req.uri().query().unwrap_or_default().to_string();

        let response = self.find_response(&method, &path, &query);

        Box::pin(async move {
            match response {
                Some((status, body)) => Ok(Response::builder()
                    .status(status)
                    .header("content-type", "application/json")
                    .body(Body::from(body.into_bytes()))
                    .unwrap()),
                None => {
                    // Default 404 for unmatched requests
                    let body = r#"{"kind":"Status","apiVersion":"v1","status":"Failure","message":"not found","reason":"NotFound","code":404}"#;
                    Ok(Response::builder()
                        .status(404)
                        .header("content-type", "application/json")
                        .body(Body::from(body.as_bytes().to_vec()))
                        .unwrap())
                }
            }
        })
    }
}

/// Render a newline-delimited watch response body from (event type, object)
/// pairs
pub fn watch_body(events: &[(&str, serde_json::Value)]) -> String {
    events
        .iter()
        .map(|(event_type, object)| {
            serde_json::json!({"type": event_type, "object": object}).to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

/// Create a mock Deployment JSON object
pub fn deployment_json(
    name: &str,
    namespace: &str,
    replicas: i32,
    ready_replicas: i32,
) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1"
        },
        "status": {
            "replicas": replicas,
            "readyReplicas": ready_replicas
        }
    })
}

/// Create a mock DeploymentList JSON response
pub fn deployment_list_json(items: &[serde_json::Value]) -> String {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "DeploymentList",
        "metadata": {"resourceVersion": "1"},
        "items": items
    })
    .to_string()
}

/// Create a mock StatefulSet JSON object
pub fn statefulset_json(
    name: &str,
    namespace: &str,
    replicas: i32,
    available_replicas: i32,
    current_replicas: i32,
    current_revision: &str,
) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "StatefulSet",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1"
        },
        "status": {
            "replicas": replicas,
            "availableReplicas": available_replicas,
            "currentReplicas": current_replicas,
            "currentRevision": current_revision
        }
    })
}

/// Create a mock PodList JSON response
pub fn pod_list_json(items: &[serde_json::Value]) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "PodList",
        "metadata": {"resourceVersion": "1"},
        "items": items
    })
    .to_string()
}

/// Create a mock Pod JSON object
pub fn pod_json(name: &str, namespace: &str, phase: &str) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1"
        },
        "status": {"phase": phase}
    })
}

/// Create a mock cert-manager Certificate JSON object with a single Ready
/// condition
pub fn certificate_json(
    name: &str,
    namespace: &str,
    ready_status: &str,
    reason: &str,
    message: &str,
) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "cert-manager.io/v1",
        "kind": "Certificate",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1"
        },
        "spec": {"secretName": format!("{name}-secret")},
        "status": {
            "conditions": [
                {"type": "Ready", "status": ready_status, "reason": reason, "message": message}
            ]
        }
    })
}

/// Create a mock ClusterSecretStore JSON object with a single Ready
/// condition
pub fn secret_store_json(
    name: &str,
    ready_status: &str,
    reason: &str,
    message: &str,
) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "external-secrets.io/v1beta1",
        "kind": "ClusterSecretStore",
        "metadata": {
            "name": name,
            "resourceVersion": "1"
        },
        "spec": {},
        "status": {
            "conditions": [
                {"type": "Ready", "status": ready_status, "reason": reason, "message": message}
            ]
        }
    })
}

/// Create a mock Secret JSON response
pub fn secret_json(name: &str, namespace: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1"
        },
        "type": "Opaque"
    })
    .to_string()
}

/// Create a mock Secret JSON response with one base64-encoded data entry
pub fn secret_with_data_json(name: &str, namespace: &str, key: &str, value_b64: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": "1"
        },
        "type": "Opaque",
        "data": {key: value_b64}
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
