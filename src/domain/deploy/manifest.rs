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

//! Derivation of the full set of cluster objects for an application.

use crate::domain::app::ApplicationSpec;
use crate::infrastructure::kubernetes::resources::{
    ScaledObject, ScaledObjectBuilder, ServiceBuilder, WorkloadBuilder,
};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;

/// The ordered set of objects that together run and auto-scale one
/// application: workload first, then its service, then the scaling policy
/// that targets the workload.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestSet {
    pub workload: Deployment,
    pub service: Service,
    pub scaler: ScaledObject,
}

pub struct ManifestBuilder;

impl ManifestBuilder {
    /// Derive the manifest set from a validated spec. Pure and
    /// deterministic: equal specs yield equal sets. Never contacts the
    /// cluster; semantic failures are all caught by validation.
    pub fn build(spec: &ApplicationSpec) -> ManifestSet {
        ManifestSet {
            workload: WorkloadBuilder::new(spec).build(),
            service: ServiceBuilder::new(spec).build(),
            scaler: ScaledObjectBuilder::new(spec).build(),
        }
    }
}
