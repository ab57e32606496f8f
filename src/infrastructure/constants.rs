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

/// Resource labels
pub const LABEL_APP: &str = "app";
pub const LABEL_TYPE: &str = "type";
pub const LABEL_TYPE_VALUE: &str = "keda-deploy";

/// Field manager for server-side apply
pub const FIELD_MANAGER: &str = "keda-deploy";

/// Derived object name suffixes
pub const SERVICE_SUFFIX: &str = "-service";
pub const SCALER_SUFFIX: &str = "-scaler";

/// Network configuration
pub const POD_CLUSTER_DOMAIN: &str = "cluster.local";
pub const PROTOCOL_TCP: &str = "TCP";
pub const SERVICE_TYPE_CLUSTER_IP: &str = "ClusterIP";

/// Resource quantity keys
pub const RESOURCE_CPU: &str = "cpu";
pub const RESOURCE_MEMORY: &str = "memory";

/// Name validation
pub const DNS_LABEL_MAX_LEN: usize = 63;

/// Defaults
pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// KEDA ScaledObject API coordinates
pub const KEDA_GROUP: &str = "keda.sh";
pub const KEDA_VERSION: &str = "v1alpha1";
pub const KEDA_KIND: &str = "ScaledObject";
pub const KEDA_PLURAL: &str = "scaledobjects";

/// KEDA installation
pub const KEDA_NAMESPACE: &str = "keda";
pub const KEDA_HELM_REPO_NAME: &str = "kedacore";
pub const KEDA_HELM_REPO_URL: &str = "https://kedacore.github.io/charts";
pub const KEDA_HELM_RELEASE: &str = "keda";
pub const KEDA_HELM_CHART: &str = "kedacore/keda";
pub const KEDA_OPERATOR_SELECTOR: &str = "app=keda-operator";

/// Pod phases
pub const POD_PHASE_RUNNING: &str = "Running";
pub const POD_PHASE_UNKNOWN: &str = "Unknown";
pub const POD_CONDITION_READY: &str = "Ready";
