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

use crate::domain::app::ApplicationSpec;
use crate::infrastructure::constants::*;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, EnvVar, PodSpec, PodTemplateSpec, ResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use std::collections::BTreeMap;

/// Builds the application workload (a Deployment with exactly one container).
///
/// The initial replica count is the spec's `min_replicas`, so a scale-to-zero
/// application starts with no pods and is woken by the scaling policy.
pub struct WorkloadBuilder<'a> {
    spec: &'a ApplicationSpec,
}

impl<'a> WorkloadBuilder<'a> {
    pub fn new(spec: &'a ApplicationSpec) -> Self {
        Self { spec }
    }

    pub fn build(&self) -> Deployment {
        let metadata = ObjectMeta {
            name: Some(self.spec.name().to_string()),
            namespace: Some(self.spec.namespace().to_string()),
            labels: Some(self.labels()),
            ..Default::default()
        };

        Deployment {
            metadata,
            spec: Some(DeploymentSpec {
                replicas: Some(self.spec.min_replicas() as i32),
                selector: LabelSelector {
                    match_labels: Some(self.selector()),
                    ..Default::default()
                },
                template: PodTemplateSpec {
                    metadata: Some(ObjectMeta {
                        labels: Some(self.selector()),
                        ..Default::default()
                    }),
                    spec: Some(PodSpec {
                        containers: vec![self.build_container()],
                        ..Default::default()
                    }),
                },
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn build_container(&self) -> Container {
        let resources = self.spec.resources();

        let mut requests = BTreeMap::new();
        requests.insert(
            RESOURCE_CPU.to_string(),
            Quantity(resources.cpu_request.clone()),
        );
        requests.insert(
            RESOURCE_MEMORY.to_string(),
            Quantity(resources.memory_request.clone()),
        );

        let mut limits = BTreeMap::new();
        limits.insert(
            RESOURCE_CPU.to_string(),
            Quantity(resources.cpu_limit.clone()),
        );
        limits.insert(
            RESOURCE_MEMORY.to_string(),
            Quantity(resources.memory_limit.clone()),
        );

        let env: Vec<EnvVar> = self
            .spec
            .env_vars()
            .iter()
            .map(|(k, v)| EnvVar {
                name: k.clone(),
                value: Some(v.clone()),
                value_from: None,
            })
            .collect();

        Container {
            name: self.spec.name().to_string(),
            image: Some(self.spec.image_ref()),
            ports: Some(vec![ContainerPort {
                container_port: self.spec.port() as i32,
                protocol: Some(PROTOCOL_TCP.to_string()),
                ..Default::default()
            }]),
            resources: Some(ResourceRequirements {
                requests: Some(requests),
                limits: Some(limits),
                ..Default::default()
            }),
            env: if env.is_empty() { None } else { Some(env) },
            ..Default::default()
        }
    }

    fn selector(&self) -> BTreeMap<String, String> {
        let mut selector = BTreeMap::new();
        selector.insert(LABEL_APP.to_string(), self.spec.name().to_string());
        selector
    }

    pub fn labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_APP.to_string(), self.spec.name().to_string());
        labels.insert(LABEL_TYPE.to_string(), LABEL_TYPE_VALUE.to_string());
        labels
    }
}
