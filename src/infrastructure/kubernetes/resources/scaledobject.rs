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

//! Typed model of the KEDA `keda.sh/v1alpha1` ScaledObject custom resource.
//!
//! The trigger metadata map is passed through from the scaler configuration
//! without interpretation; new scaler kinds only need a registry entry, not
//! changes here.

use crate::domain::app::ApplicationSpec;
use crate::infrastructure::constants::*;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledObject {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ScaledObjectSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledObjectSpec {
    pub scale_target_ref: ScaleTargetRef,
    pub min_replica_count: i32,
    pub max_replica_count: i32,
    pub triggers: Vec<ScaleTrigger>,
}

/// Reference to the workload the policy scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleTargetRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleTrigger {
    #[serde(rename = "type")]
    pub trigger_type: String,
    pub metadata: BTreeMap<String, String>,
    #[serde(
        rename = "authenticationRef",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub authentication_ref: Option<TriggerAuthenticationRef>,
}

/// Credential object reference; the credential itself is managed outside
/// this tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerAuthenticationRef {
    pub name: String,
}

pub struct ScaledObjectBuilder<'a> {
    spec: &'a ApplicationSpec,
}

impl<'a> ScaledObjectBuilder<'a> {
    pub fn new(spec: &'a ApplicationSpec) -> Self {
        Self { spec }
    }

    pub fn build(&self) -> ScaledObject {
        let metadata = ObjectMeta {
            name: Some(self.spec.scaler_name()),
            namespace: Some(self.spec.namespace().to_string()),
            labels: Some(self.labels()),
            ..Default::default()
        };

        ScaledObject {
            api_version: format!("{}/{}", KEDA_GROUP, KEDA_VERSION),
            kind: KEDA_KIND.to_string(),
            metadata,
            spec: ScaledObjectSpec {
                scale_target_ref: ScaleTargetRef {
                    name: self.spec.name().to_string(),
                },
                min_replica_count: self.spec.min_replicas() as i32,
                max_replica_count: self.spec.max_replicas() as i32,
                triggers: vec![ScaleTrigger {
                    trigger_type: self.spec.scaler().as_str().to_string(),
                    metadata: self.spec.scaler_config().clone(),
                    authentication_ref: self.spec.trigger_auth().map(|name| {
                        TriggerAuthenticationRef {
                            name: name.to_string(),
                        }
                    }),
                }],
            },
        }
    }

    pub fn labels(&self) -> BTreeMap<String, String> {
        let mut labels = BTreeMap::new();
        labels.insert(LABEL_APP.to_string(), self.spec.name().to_string());
        labels.insert(LABEL_TYPE.to_string(), LABEL_TYPE_VALUE.to_string());
        labels
    }
}
