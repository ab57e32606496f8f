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

//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::deploy::{DeploymentResult, HealthSnapshot};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render a health snapshot as a formatted table
    pub fn render_health(&self, snapshot: &HealthSnapshot) -> String {
        let desired = snapshot.replicas.max(0) as u32;
        let ready = snapshot.ready_replicas.max(0) as u32;

        let replica_icon = StatusIcon::get_replica_icon(ready, desired);
        let replica_color = self.theme.get_replica_color(ready, desired);

        let overall = if desired == 0 {
            "Scaled to zero"
        } else if ready == desired {
            "Healthy"
        } else if ready > 0 {
            "Degraded"
        } else {
            "Unhealthy"
        };

        let mut output = String::new();
        output.push_str(&format!(
            "Deployment: {} | Namespace: {}\n",
            snapshot.deployment_name, snapshot.namespace
        ));
        output.push_str(&format!(
            "Status: {} {} (ready {}/{}, available {})\n",
            replica_icon, overall, ready, desired, snapshot.available_replicas
        ));

        if snapshot.pod_statuses.is_empty() {
            output.push_str("No pods found\n");
            return output;
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("POD").set_alignment(CellAlignment::Left),
                Cell::new("PHASE").set_alignment(CellAlignment::Center),
                Cell::new("READY").set_alignment(CellAlignment::Center),
            ]);

        for pod in &snapshot.pod_statuses {
            let phase_icon = StatusIcon::get_phase_icon(&pod.phase);
            let phase_color = self.theme.get_phase_color(&pod.phase);
            let (ready_text, ready_color) = if pod.ready {
                ("true", Color::Green)
            } else {
                ("false", Color::Red)
            };

            table.add_row(vec![
                Cell::new(&pod.name),
                Cell::new(format!("{} {}", phase_icon, pod.phase)).fg(phase_color),
                Cell::new(ready_text).fg(ready_color),
            ]);
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!(
            "Legend: {} Healthy  {} Degraded  {} Failed  {} Idle\n",
            StatusIcon::SUCCESS.green(),
            StatusIcon::WARNING.yellow(),
            StatusIcon::ERROR.red(),
            StatusIcon::IDLE.bright_black(),
        ));

        output
    }

    /// Render a deployment result summary
    pub fn render_deploy_summary(&self, result: &DeploymentResult) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
            ]);

        for object in &result.applied {
            table.add_row(vec![
                Cell::new(object.kind.as_str()).fg(self.theme.info),
                Cell::new(&object.name),
                Cell::new(&object.namespace),
            ]);
        }

        let mut output = String::new();
        output.push_str(&table.to_string());
        output.push('\n');
        output.push_str(&format!("Endpoint: {}\n", result.endpoint));
        output.push_str(&format!(
            "Scaling: {}-{} replicas via {}\n",
            result.scaling.min_replicas, result.scaling.max_replicas, result.scaling.scaler_type
        ));

        output
    }
}
