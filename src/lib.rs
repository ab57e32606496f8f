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

// Core modules
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export commonly used types
pub use domain::app::{AppValidator, ApplicationSpec, ResourceSpec};
pub use domain::config::{RawAppConfig, ScalerKind};
pub use domain::deploy::{
    DeploymentOrchestrator, DeploymentResult, HealthReporter, HealthSnapshot, ManifestBuilder,
    ManifestSet, PodHealth, ScalingSummary,
};
pub use infrastructure::installer::{InstallError, KedaInstaller};
pub use infrastructure::kubernetes::{AppliedObject, ClusterGateway, KubeGateway, ObjectKind};
pub use shared::{
    ClusterError, ClusterErrorKind, DeployError, DeployStep, OrchestrationError, Result,
    ValidationError,
};

// Re-export builders for internal use
#[doc(hidden)]
pub use infrastructure::kubernetes::resources::{
    ScaledObject, ScaledObjectBuilder, ServiceBuilder, WorkloadBuilder,
};
