// Copyright 2025 keda-deploy Team.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The only module that talks to the cluster API.
//!
//! Applies are idempotent: create when absent, server-side apply when
//! present, keyed by name + namespace + kind. Every remote call is bounded
//! by the caller-supplied timeout and fails closed as `Unavailable` on
//! expiry. The gateway holds no cluster state; the cluster is the sole
//! source of truth.

use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::resources::ScaledObject;
use crate::shared::error::{ClusterError, ClusterErrorKind};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Pod, Service};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{
    Api, ApiResource, DynamicObject, GroupVersionKind, ListParams, Patch, PatchParams, PostParams,
};
use kube::Client;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Kinds of cluster objects this tool manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectKind {
    #[serde(rename = "Deployment")]
    Workload,
    #[serde(rename = "Service")]
    Service,
    #[serde(rename = "ScaledObject")]
    ScalingPolicy,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Workload => "Deployment",
            ObjectKind::Service => "Service",
            ObjectKind::ScalingPolicy => "ScaledObject",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an object after a successful apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedObject {
    pub kind: ObjectKind,
    pub name: String,
    pub namespace: String,
}

impl std::fmt::Display for AppliedObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

#[async_trait::async_trait]
pub trait ClusterGateway: Send + Sync {
    async fn ensure_namespace(&self, namespace: &str) -> Result<(), ClusterError>;

    async fn apply_workload(&self, workload: &Deployment) -> Result<AppliedObject, ClusterError>;

    async fn apply_service(&self, service: &Service) -> Result<AppliedObject, ClusterError>;

    async fn apply_scaler(&self, scaler: &ScaledObject) -> Result<AppliedObject, ClusterError>;

    async fn get_workload(&self, name: &str, namespace: &str)
        -> Result<Deployment, ClusterError>;

    async fn list_pods(&self, selector: &str, namespace: &str)
        -> Result<Vec<Pod>, ClusterError>;
}

pub struct KubeGateway {
    client: Client,
    timeout: Duration,
}

impl KubeGateway {
    pub async fn new(timeout: Duration) -> Result<Self, ClusterError> {
        let client = Client::try_default().await.map_err(|e| {
            connection_error(format!("failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client, timeout })
    }

    pub async fn new_with_config(
        kubeconfig_path: Option<String>,
        context: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClusterError> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path)
                .map_err(|e| connection_error(format!("failed to load kubeconfig: {}", e)))?
        } else {
            Kubeconfig::read()
                .map_err(|e| connection_error(format!("failed to load kubeconfig: {}", e)))?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| connection_error(format!("failed to create Kubernetes config: {}", e)))?;

        let client = Client::try_from(config).map_err(|e| {
            connection_error(format!("failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self { client, timeout })
    }

    pub fn get_client(&self) -> Client {
        self.client.clone()
    }

    /// Bound a remote call by the configured timeout. Expiry is surfaced as
    /// `Unavailable` rather than hanging.
    async fn bounded<T, F>(
        &self,
        resource: &str,
        name: &str,
        namespace: &str,
        fut: F,
    ) -> Result<T, ClusterError>
    where
        F: Future<Output = Result<T, kube::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(classify(e, resource, name, namespace)),
            Err(_) => Err(ClusterError::new(
                ClusterErrorKind::Unavailable,
                resource,
                name,
                namespace,
                format!("call timed out after {}s", self.timeout.as_secs()),
            )),
        }
    }
}

#[async_trait::async_trait]
impl ClusterGateway for KubeGateway {
    async fn ensure_namespace(&self, namespace: &str) -> Result<(), ClusterError> {
        let api: Api<Namespace> = Api::all(self.client.clone());

        match self
            .bounded("Namespace", namespace, "", api.get(namespace))
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_found() => {
                let body = Namespace {
                    metadata: ObjectMeta {
                        name: Some(namespace.to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                };
                let pp = PostParams::default();
                self.bounded("Namespace", namespace, "", api.create(&pp, &body))
                    .await?;
                debug!(namespace, "created namespace");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn apply_workload(&self, workload: &Deployment) -> Result<AppliedObject, ClusterError> {
        let (name, namespace) = object_identity(&workload.metadata, "Deployment")?;
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), &namespace);

        match self
            .bounded("Deployment", &name, &namespace, api.get(&name))
            .await
        {
            Ok(_) => {
                let patch_params = PatchParams::apply(FIELD_MANAGER).force();
                self.bounded(
                    "Deployment",
                    &name,
                    &namespace,
                    api.patch(&name, &patch_params, &Patch::Apply(workload)),
                )
                .await?;
            }
            Err(e) if e.is_not_found() => {
                let pp = PostParams::default();
                self.bounded("Deployment", &name, &namespace, api.create(&pp, workload))
                    .await?;
            }
            Err(e) => return Err(e),
        }

        debug!(%name, %namespace, "applied workload");
        Ok(AppliedObject {
            kind: ObjectKind::Workload,
            name,
            namespace,
        })
    }

    async fn apply_service(&self, service: &Service) -> Result<AppliedObject, ClusterError> {
        let (name, namespace) = object_identity(&service.metadata, "Service")?;
        let api: Api<Service> = Api::namespaced(self.client.clone(), &namespace);

        match self
            .bounded("Service", &name, &namespace, api.get(&name))
            .await
        {
            Ok(existing) => {
                // ClusterIP is allocated server-side and immutable; carry it
                // over so a re-apply of the same logical spec is a no-op.
                let mut service_to_patch = service.clone();
                if let (Some(existing_spec), Some(new_spec)) =
                    (&existing.spec, &mut service_to_patch.spec)
                {
                    new_spec.cluster_ip = existing_spec.cluster_ip.clone();
                    new_spec.cluster_ips = existing_spec.cluster_ips.clone();
                }

                let patch_params = PatchParams::apply(FIELD_MANAGER).force();
                self.bounded(
                    "Service",
                    &name,
                    &namespace,
                    api.patch(&name, &patch_params, &Patch::Apply(&service_to_patch)),
                )
                .await?;
            }
            Err(e) if e.is_not_found() => {
                let pp = PostParams::default();
                self.bounded("Service", &name, &namespace, api.create(&pp, service))
                    .await?;
            }
            Err(e) => return Err(e),
        }

        debug!(%name, %namespace, "applied service");
        Ok(AppliedObject {
            kind: ObjectKind::Service,
            name,
            namespace,
        })
    }

    async fn apply_scaler(&self, scaler: &ScaledObject) -> Result<AppliedObject, ClusterError> {
        let (name, namespace) = object_identity(&scaler.metadata, "ScaledObject")?;

        let gvk = GroupVersionKind::gvk(KEDA_GROUP, KEDA_VERSION, KEDA_KIND);
        let ar = ApiResource::from_gvk_with_plural(&gvk, KEDA_PLURAL);
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), &namespace, &ar);

        let body = serde_json::to_value(scaler).map_err(|e| {
            ClusterError::new(
                ClusterErrorKind::Invalid,
                "ScaledObject",
                &name,
                &namespace,
                format!("failed to serialize ScaledObject: {}", e),
            )
        })?;

        match self
            .bounded("ScaledObject", &name, &namespace, api.get(&name))
            .await
        {
            Ok(_) => {
                let patch_params = PatchParams::apply(FIELD_MANAGER).force();
                self.bounded(
                    "ScaledObject",
                    &name,
                    &namespace,
                    api.patch(&name, &patch_params, &Patch::Apply(&body)),
                )
                .await?;
            }
            Err(e) if e.is_not_found() => {
                let obj: DynamicObject = serde_json::from_value(body.clone()).map_err(|e| {
                    ClusterError::new(
                        ClusterErrorKind::Invalid,
                        "ScaledObject",
                        &name,
                        &namespace,
                        format!("failed to convert ScaledObject: {}", e),
                    )
                })?;
                let pp = PostParams::default();
                self.bounded("ScaledObject", &name, &namespace, api.create(&pp, &obj))
                    .await?;
            }
            Err(e) => return Err(e),
        }

        debug!(%name, %namespace, "applied scaling policy");
        Ok(AppliedObject {
            kind: ObjectKind::ScalingPolicy,
            name,
            namespace,
        })
    }

    async fn get_workload(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Deployment, ClusterError> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        self.bounded("Deployment", name, namespace, api.get(name))
            .await
    }

    async fn list_pods(
        &self,
        selector: &str,
        namespace: &str,
    ) -> Result<Vec<Pod>, ClusterError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let lp = ListParams::default().labels(selector);

        let pods = self
            .bounded("Pod", selector, namespace, api.list(&lp))
            .await?;
        Ok(pods.items)
    }
}

/// Map a kube error onto the gateway's error taxonomy.
fn classify(err: kube::Error, resource: &str, name: &str, namespace: &str) -> ClusterError {
    match err {
        kube::Error::Api(ae) => {
            let kind = match ae.code {
                404 => ClusterErrorKind::NotFound,
                409 => ClusterErrorKind::Conflict,
                401 | 403 => ClusterErrorKind::Forbidden,
                400 | 422 => ClusterErrorKind::Invalid,
                _ => ClusterErrorKind::Unavailable,
            };
            let message = if kind == ClusterErrorKind::NotFound {
                "resource does not exist".to_string()
            } else {
                ae.message
            };
            ClusterError::new(kind, resource, name, namespace, message)
        }
        other => ClusterError::new(
            ClusterErrorKind::Unavailable,
            resource,
            name,
            namespace,
            other.to_string(),
        ),
    }
}

fn object_identity(
    metadata: &ObjectMeta,
    resource: &str,
) -> Result<(String, String), ClusterError> {
    let name = metadata.name.clone().ok_or_else(|| {
        ClusterError::new(
            ClusterErrorKind::Invalid,
            resource,
            "",
            "",
            format!("{} name is required", resource),
        )
    })?;
    let namespace = metadata
        .namespace
        .clone()
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
    Ok((name, namespace))
}

fn connection_error(message: String) -> ClusterError {
    ClusterError::new(
        ClusterErrorKind::Unavailable,
        "Cluster",
        "",
        "",
        message,
    )
}
