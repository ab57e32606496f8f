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

//! Top-level deployment sequencing.
//!
//! Steps run in a fixed order: validate, build, apply workload, apply
//! service, apply scaling policy. The workload must exist before the policy
//! can target it. On failure the orchestrator stops; nothing is rolled
//! back, and the error names what was already applied so the operator knows
//! what to clean up or re-apply. Applies are idempotent, so re-running the
//! same configuration is safe.

use crate::domain::app::AppValidator;
use crate::domain::config::RawAppConfig;
use crate::domain::deploy::manifest::ManifestBuilder;
use crate::infrastructure::constants::POD_CLUSTER_DOMAIN;
use crate::infrastructure::kubernetes::client::{AppliedObject, ClusterGateway, KubeGateway};
use crate::shared::error::{ClusterError, DeployError, DeployStep, OrchestrationError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Resolved scaling configuration reported back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ScalingSummary {
    pub min_replicas: u32,
    pub max_replicas: u32,
    pub scaler_type: String,
    pub scaler_config: BTreeMap<String, String>,
}

/// Outcome of a successful deploy: the three applied object identities, the
/// cluster-internal endpoint, and the scaling bounds in effect.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentResult {
    pub deployment_name: String,
    pub namespace: String,
    pub endpoint: String,
    pub applied: Vec<AppliedObject>,
    pub scaling: ScalingSummary,
}

pub struct DeploymentOrchestrator {
    gateway: Box<dyn ClusterGateway>,
}

impl DeploymentOrchestrator {
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

    pub async fn deploy(&self, raw: &RawAppConfig) -> Result<DeploymentResult> {
        debug!(step = %DeployStep::Validating, "validating configuration");
        let spec = AppValidator::validate(raw)?;

        debug!(step = %DeployStep::Building, "deriving manifests");
        let manifests = ManifestBuilder::build(&spec);

        let mut applied: Vec<AppliedObject> = Vec::new();

        // The namespace gates the first apply, so a failure here is
        // attributed to the workload step.
        self.gateway
            .ensure_namespace(spec.namespace())
            .await
            .map_err(|e| step_failure(DeployStep::ApplyingWorkload, &applied, e))?;

        let workload = self
            .gateway
            .apply_workload(&manifests.workload)
            .await
            .map_err(|e| step_failure(DeployStep::ApplyingWorkload, &applied, e))?;
        println!("✓ Deployment {} applied", workload.name);
        applied.push(workload);

        let service = self
            .gateway
            .apply_service(&manifests.service)
            .await
            .map_err(|e| step_failure(DeployStep::ApplyingService, &applied, e))?;
        println!("✓ Service {} applied", service.name);
        applied.push(service);

        let scaler = self
            .gateway
            .apply_scaler(&manifests.scaler)
            .await
            .map_err(|e| step_failure(DeployStep::ApplyingPolicy, &applied, e))?;
        println!("✓ ScaledObject {} applied", scaler.name);
        applied.push(scaler);

        Ok(DeploymentResult {
            deployment_name: spec.name().to_string(),
            namespace: spec.namespace().to_string(),
            endpoint: format!(
                "{}.{}.svc.{}:{}",
                spec.service_name(),
                spec.namespace(),
                POD_CLUSTER_DOMAIN,
                spec.port()
            ),
            applied,
            scaling: ScalingSummary {
                min_replicas: spec.min_replicas(),
                max_replicas: spec.max_replicas(),
                scaler_type: spec.scaler().as_str().to_string(),
                scaler_config: spec.scaler_config().clone(),
            },
        })
    }
}

fn step_failure(
    step: DeployStep,
    applied: &[AppliedObject],
    source: ClusterError,
) -> DeployError {
    DeployError::Orchestration(OrchestrationError {
        step,
        applied: applied.iter().map(ToString::to_string).collect(),
        source,
    })
}
