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

//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on replica status
    pub fn get_replica_color(&self, ready: u32, total: u32) -> TableColor {
        if total == 0 {
            self.muted
        } else if ready == total {
            self.success
        } else if ready > 0 {
            self.warning
        } else {
            self.error
        }
    }

    /// Get color for a pod phase
    pub fn get_phase_color(&self, phase: &str) -> TableColor {
        match phase {
            "Running" | "Succeeded" => self.success,
            "Pending" => self.warning,
            "Failed" => self.error,
            _ => self.muted,
        }
    }
}
