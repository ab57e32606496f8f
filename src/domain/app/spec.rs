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

//! The validated application model.
//!
//! An `ApplicationSpec` can only be obtained through `AppValidator::validate`,
//! so any value of this type has passed the full validation pass. Fields are
//! private and the type is immutable; mutating the description means editing
//! the raw document and re-validating.

use crate::domain::config::ScalerKind;
use std::collections::BTreeMap;

/// Resource requests and limits, already checked for well-formedness and
/// request ≤ limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    pub cpu_request: String,
    pub cpu_limit: String,
    pub memory_request: String,
    pub memory_limit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationSpec {
    name: String,
    namespace: String,
    image: String,
    tag: String,
    resources: ResourceSpec,
    port: u16,
    min_replicas: u32,
    max_replicas: u32,
    scaler: ScalerKind,
    scaler_config: BTreeMap<String, String>,
    trigger_auth: Option<String>,
    env_vars: BTreeMap<String, String>,
}

impl ApplicationSpec {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name: String,
        namespace: String,
        image: String,
        tag: String,
        resources: ResourceSpec,
        port: u16,
        min_replicas: u32,
        max_replicas: u32,
        scaler: ScalerKind,
        scaler_config: BTreeMap<String, String>,
        trigger_auth: Option<String>,
        env_vars: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name,
            namespace,
            image,
            tag,
            resources,
            port,
            min_replicas,
            max_replicas,
            scaler,
            scaler_config,
            trigger_auth,
            env_vars,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Full image reference, `repository:tag`.
    pub fn image_ref(&self) -> String {
        format!("{}:{}", self.image, self.tag)
    }

    pub fn resources(&self) -> &ResourceSpec {
        &self.resources
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn min_replicas(&self) -> u32 {
        self.min_replicas
    }

    pub fn max_replicas(&self) -> u32 {
        self.max_replicas
    }

    pub fn scaler(&self) -> ScalerKind {
        self.scaler
    }

    pub fn scaler_config(&self) -> &BTreeMap<String, String> {
        &self.scaler_config
    }

    pub fn trigger_auth(&self) -> Option<&str> {
        self.trigger_auth.as_deref()
    }

    pub fn env_vars(&self) -> &BTreeMap<String, String> {
        &self.env_vars
    }

    /// Name of the derived Service object.
    pub fn service_name(&self) -> String {
        format!("{}{}", self.name, crate::infrastructure::constants::SERVICE_SUFFIX)
    }

    /// Name of the derived scaling policy object.
    pub fn scaler_name(&self) -> String {
        format!("{}{}", self.name, crate::infrastructure::constants::SCALER_SUFFIX)
    }
}
