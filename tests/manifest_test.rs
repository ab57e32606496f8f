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

use keda_deploy::*;
use std::collections::BTreeMap;
use std::io::Write;

mod test_utils {
    use super::*;

    pub fn sample_config() -> RawAppConfig {
        let mut scaler_config = BTreeMap::new();
        scaler_config.insert("queueName".to_string(), "my-queue".to_string());
        scaler_config.insert("queueLength".to_string(), "5".to_string());
        scaler_config.insert(
            "host".to_string(),
            "rabbitmq.default.svc.cluster.local".to_string(),
        );

        RawAppConfig {
            deployment_name: Some("my-app".to_string()),
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
}

// ============================================================================
// Validation rules
// ============================================================================

#[test]
fn test_valid_config_accepted() {
    let spec = AppValidator::validate(&test_utils::sample_config()).unwrap();
    assert_eq!(spec.name(), "my-app");
    assert_eq!(spec.namespace(), "default");
    assert_eq!(spec.image_ref(), "nginxdemos/hello:latest");
    assert_eq!(spec.port(), 80);
    assert_eq!(spec.min_replicas(), 0);
    assert_eq!(spec.max_replicas(), 5);
    assert_eq!(spec.scaler(), ScalerKind::RabbitMq);
}

#[test]
fn test_namespace_defaults_to_default() {
    let mut config = test_utils::sample_config();
    config.namespace = None;
    let spec = AppValidator::validate(&config).unwrap();
    assert_eq!(spec.namespace(), "default");
}

#[test]
fn test_missing_required_field_rejected() {
    let mut config = test_utils::sample_config();
    config.image = None;

    let err = AppValidator::validate(&config).unwrap_err();
    assert!(matches!(err, ValidationError::Missing { .. }));
    assert_eq!(err.field(), "image");
}

#[test]
fn test_invalid_deployment_name_rejected() {
    for name in ["My-App", "app_1", "-app", "app-", ""] {
        let mut config = test_utils::sample_config();
        config.deployment_name = Some(name.to_string());

        let err = AppValidator::validate(&config).unwrap_err();
        assert_eq!(err.field(), "deployment_name", "name '{}'", name);
    }
}

#[test]
fn test_port_bounds() {
    for port in [0i64, -1, 65536, 700000] {
        let mut config = test_utils::sample_config();
        config.port = Some(port);

        let err = AppValidator::validate(&config).unwrap_err();
        assert_eq!(err.field(), "port", "port {}", port);
    }

    let mut config = test_utils::sample_config();
    config.port = Some(65535);
    assert!(AppValidator::validate(&config).is_ok());
}

#[test]
fn test_max_replicas_below_min_rejected() {
    let mut config = test_utils::sample_config();
    config.min_replicas = Some(3);
    config.max_replicas = Some(2);

    let err = AppValidator::validate(&config).unwrap_err();
    assert!(matches!(err, ValidationError::OutOfRange { .. }));
    assert_eq!(err.field(), "max_replicas");
}

#[test]
fn test_max_replicas_equal_min_accepted() {
    let mut config = test_utils::sample_config();
    config.min_replicas = Some(3);
    config.max_replicas = Some(3);

    let spec = AppValidator::validate(&config).unwrap();
    assert_eq!(spec.min_replicas(), 3);
    assert_eq!(spec.max_replicas(), 3);
}

#[test]
fn test_negative_max_replicas_rejected() {
    let mut config = test_utils::sample_config();
    config.max_replicas = Some(-1);

    let err = AppValidator::validate(&config).unwrap_err();
    assert!(matches!(err, ValidationError::OutOfRange { .. }));
    assert_eq!(err.field(), "max_replicas");
}

#[test]
fn test_unsupported_scaler_kind_rejected() {
    let mut config = test_utils::sample_config();
    config.scaler_type = Some("carrier-pigeon".to_string());

    let err = AppValidator::validate(&config).unwrap_err();
    assert!(matches!(err, ValidationError::Unsupported { .. }));
    assert_eq!(err.field(), "scaler_type");
}

#[test]
fn test_missing_scaler_parameter_rejected() {
    let mut config = test_utils::sample_config();
    let mut scaler_config = config.scaler_config.unwrap();
    scaler_config.remove("host");
    config.scaler_config = Some(scaler_config);

    let err = AppValidator::validate(&config).unwrap_err();
    assert!(matches!(err, ValidationError::Missing { .. }));
    assert_eq!(err.field(), "scaler_config.host");
}

#[test]
fn test_request_above_limit_rejected() {
    let mut config = test_utils::sample_config();
    config.memory_request = Some("512Mi".to_string());

    let err = AppValidator::validate(&config).unwrap_err();
    assert_eq!(err.field(), "memory_request");

    let mut config = test_utils::sample_config();
    config.cpu_request = Some("1".to_string());

    let err = AppValidator::validate(&config).unwrap_err();
    assert_eq!(err.field(), "cpu_request");
}

#[test]
fn test_malformed_quantity_rejected() {
    let mut config = test_utils::sample_config();
    config.cpu_limit = Some("lots".to_string());

    let err = AppValidator::validate(&config).unwrap_err();
    assert!(matches!(err, ValidationError::Malformed { .. }));
    assert_eq!(err.field(), "cpu_limit");
}

#[test]
fn test_invalid_env_var_key_rejected() {
    let mut config = test_utils::sample_config();
    config
        .env_vars
        .insert("1BAD-KEY".to_string(), "value".to_string());

    let err = AppValidator::validate(&config).unwrap_err();
    assert_eq!(err.field(), "env_vars");
}

// ============================================================================
// Manifest derivation
// ============================================================================

#[test]
fn test_build_is_deterministic() {
    let spec = AppValidator::validate(&test_utils::sample_config()).unwrap();
    let first = ManifestBuilder::build(&spec);
    let second = ManifestBuilder::build(&spec);
    assert_eq!(first, second);
}

#[test]
fn test_scale_to_zero_initial_replicas() {
    let spec = AppValidator::validate(&test_utils::sample_config()).unwrap();
    let manifests = ManifestBuilder::build(&spec);

    assert_eq!(manifests.workload.spec.as_ref().unwrap().replicas, Some(0));
}

#[test]
fn test_workload_has_single_container() {
    let spec = AppValidator::validate(&test_utils::sample_config()).unwrap();
    let manifests = ManifestBuilder::build(&spec);

    let pod_spec = manifests
        .workload
        .spec
        .as_ref()
        .unwrap()
        .template
        .spec
        .as_ref()
        .unwrap();
    assert_eq!(pod_spec.containers.len(), 1);

    let container = &pod_spec.containers[0];
    assert_eq!(container.name, "my-app");
    assert_eq!(container.image.as_deref(), Some("nginxdemos/hello:latest"));
    assert_eq!(
        container.ports.as_ref().unwrap()[0].container_port,
        80
    );

    let resources = container.resources.as_ref().unwrap();
    let requests = resources.requests.as_ref().unwrap();
    assert_eq!(requests.get("cpu").unwrap().0, "100m");
    assert_eq!(requests.get("memory").unwrap().0, "128Mi");
    let limits = resources.limits.as_ref().unwrap();
    assert_eq!(limits.get("cpu").unwrap().0, "200m");
    assert_eq!(limits.get("memory").unwrap().0, "256Mi");
}

#[test]
fn test_env_vars_copied_verbatim() {
    let mut config = test_utils::sample_config();
    config
        .env_vars
        .insert("QUEUE_NAME".to_string(), "my-queue".to_string());
    config
        .env_vars
        .insert("LOG_LEVEL".to_string(), "debug".to_string());

    let spec = AppValidator::validate(&config).unwrap();
    let manifests = ManifestBuilder::build(&spec);

    let container = &manifests
        .workload
        .spec
        .as_ref()
        .unwrap()
        .template
        .spec
        .as_ref()
        .unwrap()
        .containers[0];
    let env = container.env.as_ref().unwrap();

    assert_eq!(env.len(), 2);
    // BTreeMap iteration keeps env ordering stable across builds
    assert_eq!(env[0].name, "LOG_LEVEL");
    assert_eq!(env[0].value.as_deref(), Some("debug"));
    assert_eq!(env[1].name, "QUEUE_NAME");
    assert_eq!(env[1].value.as_deref(), Some("my-queue"));
}

#[test]
fn test_service_shape() {
    let spec = AppValidator::validate(&test_utils::sample_config()).unwrap();
    let manifests = ManifestBuilder::build(&spec);

    let service = &manifests.service;
    assert_eq!(service.metadata.name.as_deref(), Some("my-app-service"));
    assert_eq!(service.metadata.namespace.as_deref(), Some("default"));

    let service_spec = service.spec.as_ref().unwrap();
    assert_eq!(service_spec.type_.as_deref(), Some("ClusterIP"));
    assert_eq!(
        service_spec.selector.as_ref().unwrap().get("app").unwrap(),
        "my-app"
    );
    assert_eq!(service_spec.ports.as_ref().unwrap()[0].port, 80);
}

#[test]
fn test_scaled_object_shape() {
    let spec = AppValidator::validate(&test_utils::sample_config()).unwrap();
    let manifests = ManifestBuilder::build(&spec);

    let scaler = &manifests.scaler;
    assert_eq!(scaler.api_version, "keda.sh/v1alpha1");
    assert_eq!(scaler.kind, "ScaledObject");
    assert_eq!(scaler.metadata.name.as_deref(), Some("my-app-scaler"));
    assert_eq!(scaler.spec.scale_target_ref.name, "my-app");
    assert_eq!(scaler.spec.min_replica_count, 0);
    assert_eq!(scaler.spec.max_replica_count, 5);

    let trigger = &scaler.spec.triggers[0];
    assert_eq!(trigger.trigger_type, "rabbitmq");
    assert_eq!(trigger.metadata.get("queueName").unwrap(), "my-queue");
    assert_eq!(trigger.metadata.get("queueLength").unwrap(), "5");
    assert_eq!(
        trigger.metadata.get("host").unwrap(),
        "rabbitmq.default.svc.cluster.local"
    );
    assert!(trigger.authentication_ref.is_none());
}

#[test]
fn test_trigger_auth_reference_passed_through() {
    let mut config = test_utils::sample_config();
    config.trigger_auth = Some("rabbitmq-creds".to_string());

    let spec = AppValidator::validate(&config).unwrap();
    let manifests = ManifestBuilder::build(&spec);

    let trigger = &manifests.scaler.spec.triggers[0];
    assert_eq!(
        trigger.authentication_ref.as_ref().unwrap().name,
        "rabbitmq-creds"
    );
}

// ============================================================================
// Configuration file loading
// ============================================================================

#[test]
fn test_config_from_yaml_file() {
    let yaml = r#"
deployment_name: my-app
namespace: default
image: nginxdemos/hello
tag: latest
cpu_request: 100m
cpu_limit: 200m
memory_request: 128Mi
memory_limit: 256Mi
port: 80
min_replicas: 0
max_replicas: 5
scaler_type: rabbitmq
scaler_config:
  queueName: my-queue
  queueLength: "5"
  host: rabbitmq.default.svc.cluster.local
env_vars:
  LOG_LEVEL: info
"#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let raw = RawAppConfig::from_file(file.path().to_str().unwrap()).unwrap();
    let spec = AppValidator::validate(&raw).unwrap();
    assert_eq!(spec.name(), "my-app");
    assert_eq!(spec.env_vars().get("LOG_LEVEL").unwrap(), "info");
}

#[test]
fn test_config_file_missing() {
    let err = RawAppConfig::from_file("/nonexistent/app.yaml").unwrap_err();
    assert!(matches!(err, DeployError::Io(_)));
}

#[test]
fn test_config_file_invalid_yaml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{not valid yaml: [").unwrap();

    let err = RawAppConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, DeployError::YamlParse(_)));
}
