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

//! Builders for the cluster objects derived from an application spec

pub mod scaledobject;
pub mod service;
pub mod workload;

pub use self::scaledobject::{
    ScaleTargetRef, ScaleTrigger, ScaledObject, ScaledObjectBuilder, ScaledObjectSpec,
    TriggerAuthenticationRef,
};
pub use self::service::ServiceBuilder;
pub use self::workload::WorkloadBuilder;
