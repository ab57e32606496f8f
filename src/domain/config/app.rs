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

//! Raw application configuration as read from a YAML document.
//!
//! Every scalar field is optional so that the validator can report precisely
//! which required field is missing. Numeric fields are wide signed integers
//! so that out-of-range values (a negative replica count, a port above
//! 65535) survive parsing and are rejected by validation instead of serde.

use crate::shared::error::{DeployError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::read_to_string;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAppConfig {
    pub deployment_name: Option<String>,
    pub namespace: Option<String>,
    pub image: Option<String>,
    pub tag: Option<String>,
    pub cpu_request: Option<String>,
    pub cpu_limit: Option<String>,
    pub memory_request: Option<String>,
    pub memory_limit: Option<String>,
    pub port: Option<i64>,
    pub min_replicas: Option<i64>,
    pub max_replicas: Option<i64>,
    pub scaler_type: Option<String>,
    pub scaler_config: Option<BTreeMap<String, String>>,
    pub trigger_auth: Option<String>,
    pub env_vars: BTreeMap<String, String>,
}

impl RawAppConfig {
    /// Load a configuration document from a YAML file.
    pub fn from_file<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            DeployError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read config file {}: {}", path.as_ref(), e),
            ))
        })?;

        let conf: Self = serde_yaml::from_str(&content)?;
        Ok(conf)
    }
}
