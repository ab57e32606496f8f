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
use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

/// Builds the cluster-internal Service fronting the workload.
///
/// Routing is ClusterIP only; exposing the application outside the cluster
/// is not this tool's job.
pub struct ServiceBuilder<'a> {
    spec: &'a ApplicationSpec,
}

impl<'a> ServiceBuilder<'a> {
    pub fn new(spec: &'a ApplicationSpec) -> Self {
        Self { spec }
    }

    pub fn build(&self) -> Service {
        let port = self.spec.port() as i32;

        let mut selector = BTreeMap::new();
        selector.insert(LABEL_APP.to_string(), self.spec.name().to_string());

        let metadata = ObjectMeta {
            name: Some(self.spec.service_name()),
            namespace: Some(self.spec.namespace().to_string()),
            labels: Some(self.labels()),
            ..Default::default()
        };

        Service {
            metadata,
            spec: Some(ServiceSpec {
                type_: Some(SERVICE_TYPE_CLUSTER_IP.to_string()),
                selector: Some(selector),
                ports: Some(vec![ServicePort {
                    port,
                    target_port: Some(IntOrString::Int(port)),
                    protocol: Some(PROTOCOL_TCP.to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_APP.to_string(), self.spec.name().to_string());
        labels.insert(LABEL_TYPE.to_string(), LABEL_TYPE_VALUE.to_string());
        labels
    }
}
