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

//! Status icons for CLI output

pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";
    pub const WARNING: &'static str = "⚠";
    pub const ERROR: &'static str = "✗";
    pub const IDLE: &'static str = "○";

    /// Icon for a ready/total replica pair. A deployment scaled to zero is
    /// idle, not broken.
    pub fn get_replica_icon(ready: u32, total: u32) -> &'static str {
        if total == 0 {
            Self::IDLE
        } else if ready == total {
            Self::SUCCESS
        } else if ready > 0 {
            Self::WARNING
        } else {
            Self::ERROR
        }
    }

    pub fn get_phase_icon(phase: &str) -> &'static str {
        match phase {
            "Running" | "Succeeded" => Self::SUCCESS,
            "Pending" => Self::WARNING,
            "Failed" => Self::ERROR,
            _ => Self::IDLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replica_icons() {
        assert_eq!(StatusIcon::get_replica_icon(3, 3), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::get_replica_icon(1, 3), StatusIcon::WARNING);
        assert_eq!(StatusIcon::get_replica_icon(0, 3), StatusIcon::ERROR);
        assert_eq!(StatusIcon::get_replica_icon(0, 0), StatusIcon::IDLE);
    }

    #[test]
    fn test_phase_icons() {
        assert_eq!(StatusIcon::get_phase_icon("Running"), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::get_phase_icon("Pending"), StatusIcon::WARNING);
        assert_eq!(StatusIcon::get_phase_icon("Failed"), StatusIcon::ERROR);
        assert_eq!(StatusIcon::get_phase_icon("Unknown"), StatusIcon::IDLE);
    }
}
