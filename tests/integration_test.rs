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

#[cfg(test)]
mod tests {
    use keda_deploy::*;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn create_test_config() -> RawAppConfig {
        let mut scaler_config = BTreeMap::new();
        scaler_config.insert("queueName".to_string(), "my-queue".to_string());
        scaler_config.insert("queueLength".to_string(), "5".to_string());
        scaler_config.insert(
            "host".to_string(),
            "rabbitmq.default.svc.cluster.local".to_string(),
        );

        RawAppConfig {
            deployment_name: Some("keda-deploy-it".to_string()),
            namespace: Some("default".to_string()),
            image: Some("nginxdemos/hello".to_string()),
            tag: Some("latest".to_string()),
            cpu_request: Some("100m".to_string()),
            cpu_limit: Some("200m".to_string()),
            memory_request: Some("128Mi".to_string()),
            memory_limit: Some("256Mi".to_string()),
            port: Some(80),
            min_replicas: Some(0),
            max_replicas: Some(5),
            scaler_type: Some("rabbitmq".to_string()),
            scaler_config: Some(scaler_config),
            trigger_auth: None,
            env_vars: BTreeMap::new(),
        }
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster
    async fn test_gateway_creation() {
        let gateway = KubeGateway::new(Duration::from_secs(30))
            .await
            .expect("Failed to create gateway");

        let pods = gateway
            .list_pods("app=does-not-exist", "default")
            .await
            .expect("Failed to list pods");
        assert!(pods.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster
    async fn test_deploy_and_health_round_trip() {
        let orchestrator = DeploymentOrchestrator::new(Duration::from_secs(30))
            .await
            .expect("Failed to create orchestrator");

        let result = orchestrator
            .deploy(&create_test_config())
            .await
            .expect("Failed to deploy application");
        assert_eq!(result.applied.len(), 3);

        let reporter = HealthReporter::new(Duration::from_secs(30))
            .await
            .expect("Failed to create reporter");
        let snapshot = reporter
            .check_health("keda-deploy-it", "default")
            .await
            .expect("Failed to check health");
        assert_eq!(snapshot.deployment_name, "keda-deploy-it");
        assert_eq!(snapshot.replicas, 0);
    }

    #[tokio::test]
    #[ignore] // Requires Kubernetes cluster
    async fn test_redeploy_is_idempotent() {
        let orchestrator = DeploymentOrchestrator::new(Duration::from_secs(30))
            .await
            .expect("Failed to create orchestrator");

        let config = create_test_config();
        let first = orchestrator.deploy(&config).await.expect("First deploy");
        let second = orchestrator.deploy(&config).await.expect("Second deploy");
        assert_eq!(first.applied, second.applied);
    }
}
