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

//! Point-in-time health projection for a deployed application.

use crate::infrastructure::constants::{LABEL_APP, POD_CONDITION_READY, POD_PHASE_UNKNOWN};
use crate::infrastructure::kubernetes::client::{ClusterGateway, KubeGateway};
use crate::shared::error::Result;
use k8s_openapi::api::core::v1::Pod;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodHealth {
    pub name: String,
    pub phase: String,
    pub ready: bool,
}

/// A fresh read of the workload's state. Never cached; a deployment scaled
/// to zero yields `replicas = 0` with no pod statuses, which is distinct
/// from the deployment not existing at all (a `NotFound` error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthSnapshot {
    pub deployment_name: String,
    pub namespace: String,
    pub replicas: i32,
    pub available_replicas: i32,
    pub ready_replicas: i32,
    pub pod_statuses: Vec<PodHealth>,
}

pub struct HealthReporter {
    gateway: Box<dyn ClusterGateway>,
}

impl HealthReporter {
    pub async fn new(timeout: Duration) -> Result<Self> {
        let gateway = KubeGateway::new(timeout).await?;
        Ok(Self {
            gateway: Box::new(gateway),
        })
    }

    pub async fn new_with_config(
        kubeconfig_path: Option<String>,
        context: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let gateway = KubeGateway::new_with_config(kubeconfig_path, context, timeout).await?;
        Ok(Self {
            gateway: Box::new(gateway),
        })
    }

    pub fn with_gateway(gateway: Box<dyn ClusterGateway>) -> Self {
        Self { gateway }
    }

    /// Read the workload and its pods and project them into a snapshot.
    /// A missing workload surfaces as `NotFound`; a single failed read is
    /// returned directly, retrying is the caller's decision.
    pub async fn check_health(&self, name: &str, namespace: &str) -> Result<HealthSnapshot> {
        let workload = self.gateway.get_workload(name, namespace).await?;

        let replicas = workload
            .spec
            .as_ref()
            .and_then(|s| s.replicas)
            .unwrap_or(0);
        let available_replicas = workload
            .status
            .as_ref()
            .and_then(|s| s.available_replicas)
            .unwrap_or(0);
        let ready_replicas = workload
            .status
            .as_ref()
            .and_then(|s| s.ready_replicas)
            .unwrap_or(0);

        let selector = workload
            .spec
            .as_ref()
            .and_then(|s| s.selector.match_labels.as_ref())
            .map(|labels| {
                labels
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_else(|| format!("{}={}", LABEL_APP, name));

        let pods = self.gateway.list_pods(&selector, namespace).await?;

        let mut pod_statuses: Vec<PodHealth> = pods.iter().map(pod_health).collect();
        pod_statuses.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(HealthSnapshot {
            deployment_name: name.to_string(),
            namespace: namespace.to_string(),
            replicas,
            available_replicas,
            ready_replicas,
            pod_statuses,
        })
    }
}

fn pod_health(pod: &Pod) -> PodHealth {
    let name = pod.metadata.name.clone().unwrap_or_default();
    let phase = pod
        .status
        .as_ref()
        .and_then(|s| s.phase.clone())
        .unwrap_or_else(|| POD_PHASE_UNKNOWN.to_string());
    let ready = pod
        .status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .map(|conditions| {
            conditions
                .iter()
                .any(|c| c.type_ == POD_CONDITION_READY && c.status == "True")
        })
        .unwrap_or(false);

    PodHealth { name, phase, ready }
}
