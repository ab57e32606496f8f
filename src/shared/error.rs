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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeployError>;

/// Input validation failure. Never touches the cluster.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required configuration field: {field}")]
    Missing { field: String },

    #[error("field '{field}' is malformed: {reason}")]
    Malformed { field: String, reason: String },

    #[error("field '{field}' is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("field '{field}' has unsupported value '{value}'")]
    Unsupported { field: String, value: String },
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn out_of_range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Unsupported {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Name of the field the failure is attributed to.
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::Malformed { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::Unsupported { field, .. } => field,
        }
    }
}

/// Classification of failures at the cluster API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterErrorKind {
    NotFound,
    Conflict,
    Forbidden,
    Unavailable,
    Invalid,
}

impl std::fmt::Display for ClusterErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::Forbidden => "forbidden",
            Self::Unavailable => "unavailable",
            Self::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

/// A failed remote call, carrying the object it was about.
#[derive(Error, Debug, Clone)]
#[error("{resource} '{name}' in namespace '{namespace}' {kind}: {message}")]
pub struct ClusterError {
    pub kind: ClusterErrorKind,
    pub resource: String,
    pub name: String,
    pub namespace: String,
    pub message: String,
}

impl ClusterError {
    pub fn new(
        kind: ClusterErrorKind,
        resource: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            resource: resource.into(),
            name: name.into(),
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    pub fn not_found(
        resource: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self::new(
            ClusterErrorKind::NotFound,
            resource,
            name,
            namespace,
            "resource does not exist",
        )
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ClusterErrorKind::NotFound
    }
}

/// Orchestration step names, in apply order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStep {
    Validating,
    Building,
    ApplyingWorkload,
    ApplyingService,
    ApplyingPolicy,
}

impl std::fmt::Display for DeployStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validating => "validation",
            Self::Building => "manifest build",
            Self::ApplyingWorkload => "workload apply",
            Self::ApplyingService => "service apply",
            Self::ApplyingPolicy => "scaling policy apply",
        };
        f.write_str(s)
    }
}

/// A cluster failure wrapped with the step it occurred at and the objects
/// that had already been applied (never rolled back, only reported).
#[derive(Debug, Clone)]
pub struct OrchestrationError {
    pub step: DeployStep,
    pub applied: Vec<String>,
    pub source: ClusterError,
}

impl std::fmt::Display for OrchestrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "deployment failed during {}: {}", self.step, self.source)?;
        if !self.applied.is_empty() {
            write!(f, " (already applied: {})", self.applied.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for OrchestrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("cluster error: {0}")]
    Cluster(#[from] ClusterError),

    #[error("{0}")]
    Orchestration(#[from] OrchestrationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
