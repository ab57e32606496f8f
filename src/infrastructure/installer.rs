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

//! Idempotent Helm/KEDA bootstrap.
//!
//! This is a collaborator of the orchestrator core, not part of it: it
//! exposes a single `ensure_installed` contract and the core never depends
//! on its internals. Installing the `helm` binary itself is out of scope;
//! a missing binary is reported, not fixed.

use crate::infrastructure::constants::*;
use crate::infrastructure::kubernetes::client::ClusterGateway;
use crate::shared::error::ClusterError;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::sleep;
use tracing::debug;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("helm binary not found in PATH ({0}); install Helm and retry")]
    HelmMissing(String),

    #[error("'{command}' failed: {stderr}")]
    HelmFailed { command: String, stderr: String },

    #[error("cluster error: {0}")]
    Cluster(#[from] ClusterError),

    #[error("KEDA operator is not ready: {0}")]
    OperatorNotReady(String),
}

pub struct KedaInstaller<'a> {
    gateway: &'a dyn ClusterGateway,
    namespace: String,
}

impl<'a> KedaInstaller<'a> {
    pub fn new(gateway: &'a dyn ClusterGateway, namespace: impl Into<String>) -> Self {
        Self {
            gateway,
            namespace: namespace.into(),
        }
    }

    /// Bring the cluster to a state where KEDA is installed and its
    /// operator is running. Safe to run repeatedly: an existing release is
    /// verified, not reinstalled.
    pub async fn ensure_installed(&self) -> Result<(), InstallError> {
        let version = self.run_helm(&["version", "--short"]).await?;
        println!("✓ Helm detected: {}", version);

        self.run_helm(&[
            "repo",
            "add",
            KEDA_HELM_REPO_NAME,
            KEDA_HELM_REPO_URL,
            "--force-update",
        ])
        .await?;
        self.run_helm(&["repo", "update"]).await?;
        println!("✓ Helm repository {} up to date", KEDA_HELM_REPO_NAME);

        self.gateway.ensure_namespace(&self.namespace).await?;

        if self.release_installed().await? {
            println!(
                "✓ KEDA release already installed in namespace {}",
                self.namespace
            );
        } else {
            self.run_helm(&[
                "install",
                KEDA_HELM_RELEASE,
                KEDA_HELM_CHART,
                "--namespace",
                &self.namespace,
                "--create-namespace",
            ])
            .await?;
            println!("✓ KEDA Helm chart installed");
        }

        self.wait_for_operator().await?;
        println!("✓ KEDA operator is running");
        Ok(())
    }

    async fn run_helm(&self, args: &[&str]) -> Result<String, InstallError> {
        debug!(?args, "running helm");
        let output = Command::new("helm")
            .args(args)
            .output()
            .await
            .map_err(|e| InstallError::HelmMissing(e.to_string()))?;

        if !output.status.success() {
            return Err(InstallError::HelmFailed {
                command: format!("helm {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn release_installed(&self) -> Result<bool, InstallError> {
        let output = Command::new("helm")
            .args(["status", KEDA_HELM_RELEASE, "--namespace", &self.namespace])
            .output()
            .await
            .map_err(|e| InstallError::HelmMissing(e.to_string()))?;

        Ok(output.status.success())
    }

    async fn wait_for_operator(&self) -> Result<(), InstallError> {
        const MAX_WAIT_SECONDS: u64 = 120;
        const CHECK_INTERVAL_SECONDS: u64 = 5;

        let mut waited = 0;
        let mut last_state = String::from("no operator pods found");

        while waited < MAX_WAIT_SECONDS {
            let pods = self
                .gateway
                .list_pods(KEDA_OPERATOR_SELECTOR, &self.namespace)
                .await?;

            if !pods.is_empty() {
                let mut all_running = true;
                for pod in &pods {
                    let name = pod.metadata.name.as_deref().unwrap_or("unknown");
                    let phase = pod
                        .status
                        .as_ref()
                        .and_then(|s| s.phase.as_deref())
                        .unwrap_or(POD_PHASE_UNKNOWN);
                    if phase != POD_PHASE_RUNNING {
                        all_running = false;
                        last_state = format!("pod {} is in {} state", name, phase);
                    }
                }
                if all_running {
                    return Ok(());
                }
            }

            sleep(Duration::from_secs(CHECK_INTERVAL_SECONDS)).await;
            waited += CHECK_INTERVAL_SECONDS;
        }

        Err(InstallError::OperatorNotReady(format!(
            "{} after {}s",
            last_state, MAX_WAIT_SECONDS
        )))
    }
}
