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

//! Total validation pass from `RawAppConfig` to `ApplicationSpec`.
//!
//! Checks run in a fixed order and short-circuit on the first failure. No
//! partial spec is ever produced; every failure names the offending field
//! and the rule violated. Validation is pure and never touches the cluster.

use crate::domain::app::spec::{ApplicationSpec, ResourceSpec};
use crate::domain::config::quantity::{parse_cpu_millis, parse_memory_bytes};
use crate::domain::config::scalers::ScalerKind;
use crate::domain::config::RawAppConfig;
use crate::infrastructure::constants::{DEFAULT_NAMESPACE, DNS_LABEL_MAX_LEN};
use crate::shared::error::ValidationError;
use regex::Regex;
use std::str::FromStr;

const IMAGE_REPO_PATTERN: &str = r"^[a-z0-9]+(?:[._-][a-z0-9]+)*(?:(?::[0-9]+)?/[a-z0-9]+(?:[._-][a-z0-9]+)*)*$";
const ENV_KEY_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

pub struct AppValidator;

impl AppValidator {
    /// Validate a raw configuration document into an `ApplicationSpec`.
    pub fn validate(raw: &RawAppConfig) -> Result<ApplicationSpec, ValidationError> {
        let name = require_string(&raw.deployment_name, "deployment_name")?;
        let image = require_string(&raw.image, "image")?;
        let tag = require_string(&raw.tag, "tag")?;
        let cpu_request = require_string(&raw.cpu_request, "cpu_request")?;
        let cpu_limit = require_string(&raw.cpu_limit, "cpu_limit")?;
        let memory_request = require_string(&raw.memory_request, "memory_request")?;
        let memory_limit = require_string(&raw.memory_limit, "memory_limit")?;
        let port = raw.port.ok_or_else(|| ValidationError::missing("port"))?;
        let min_replicas = raw
            .min_replicas
            .ok_or_else(|| ValidationError::missing("min_replicas"))?;
        let max_replicas = raw
            .max_replicas
            .ok_or_else(|| ValidationError::missing("max_replicas"))?;
        let scaler_type = require_string(&raw.scaler_type, "scaler_type")?;
        let scaler_config = raw
            .scaler_config
            .as_ref()
            .ok_or_else(|| ValidationError::missing("scaler_config"))?;

        validate_dns_label(&name, "deployment_name")?;
        let namespace = match raw.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => {
                validate_dns_label(ns, "namespace")?;
                ns.to_string()
            }
            _ => DEFAULT_NAMESPACE.to_string(),
        };

        if !is_valid_image_repo(&image) {
            return Err(ValidationError::malformed(
                "image",
                format!("'{}' is not a valid image repository", image),
            ));
        }
        if tag.contains(|c: char| c.is_whitespace() || c == ':') {
            return Err(ValidationError::malformed(
                "tag",
                format!("'{}' is not a valid image tag", tag),
            ));
        }

        if !(1..=65535).contains(&port) {
            return Err(ValidationError::out_of_range(
                "port",
                format!("{} is not in 1-65535", port),
            ));
        }

        if min_replicas < 0 {
            return Err(ValidationError::out_of_range(
                "min_replicas",
                format!("{} is negative", min_replicas),
            ));
        }
        if max_replicas < 1 {
            return Err(ValidationError::out_of_range(
                "max_replicas",
                format!("{} must be at least 1", max_replicas),
            ));
        }
        if max_replicas < min_replicas {
            return Err(ValidationError::out_of_range(
                "max_replicas",
                format!("{} is less than min_replicas {}", max_replicas, min_replicas),
            ));
        }

        let cpu_request_millis = parse_cpu_millis(&cpu_request)
            .map_err(|e| ValidationError::malformed("cpu_request", e.to_string()))?;
        let cpu_limit_millis = parse_cpu_millis(&cpu_limit)
            .map_err(|e| ValidationError::malformed("cpu_limit", e.to_string()))?;
        if cpu_request_millis > cpu_limit_millis {
            return Err(ValidationError::out_of_range(
                "cpu_request",
                format!("request {} exceeds limit {}", cpu_request, cpu_limit),
            ));
        }

        let memory_request_bytes = parse_memory_bytes(&memory_request)
            .map_err(|e| ValidationError::malformed("memory_request", e.to_string()))?;
        let memory_limit_bytes = parse_memory_bytes(&memory_limit)
            .map_err(|e| ValidationError::malformed("memory_limit", e.to_string()))?;
        if memory_request_bytes > memory_limit_bytes {
            return Err(ValidationError::out_of_range(
                "memory_request",
                format!("request {} exceeds limit {}", memory_request, memory_limit),
            ));
        }

        let scaler = ScalerKind::from_str(&scaler_type)?;
        for key in scaler.required_keys() {
            match scaler_config.get(*key) {
                Some(value) if !value.is_empty() => {}
                _ => {
                    return Err(ValidationError::missing(format!("scaler_config.{}", key)));
                }
            }
        }

        for key in raw.env_vars.keys() {
            if !is_valid_env_key(key) {
                return Err(ValidationError::malformed(
                    "env_vars",
                    format!("'{}' is not a valid environment variable name", key),
                ));
            }
        }

        Ok(ApplicationSpec::new(
            name,
            namespace,
            image,
            tag,
            ResourceSpec {
                cpu_request,
                cpu_limit,
                memory_request,
                memory_limit,
            },
            port as u16,
            min_replicas as u32,
            max_replicas as u32,
            scaler,
            scaler_config.clone(),
            raw.trigger_auth.clone().filter(|s| !s.is_empty()),
            raw.env_vars.clone(),
        ))
    }
}

fn require_string(
    value: &Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(ValidationError::missing(field)),
    }
}

/// RFC 1123 DNS label: lowercase alphanumerics and '-', alphanumeric at both
/// ends, at most 63 characters.
fn validate_dns_label(name: &str, field: &'static str) -> Result<(), ValidationError> {
    if name.len() > DNS_LABEL_MAX_LEN {
        return Err(ValidationError::malformed(
            field,
            format!("'{}' exceeds {} characters", name, DNS_LABEL_MAX_LEN),
        ));
    }

    let first_last_ok = name.chars().next().is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && name.chars().last().is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let body_ok = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if first_last_ok && body_ok {
        Ok(())
    } else {
        Err(ValidationError::malformed(
            field,
            format!("'{}' is not a valid DNS label", name),
        ))
    }
}

fn is_valid_image_repo(repo: &str) -> bool {
    Regex::new(IMAGE_REPO_PATTERN)
        .map(|re| re.is_match(repo))
        .unwrap_or(false)
}

fn is_valid_env_key(key: &str) -> bool {
    Regex::new(ENV_KEY_PATTERN)
        .map(|re| re.is_match(key))
        .unwrap_or(false)
}
