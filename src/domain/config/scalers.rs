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

//! Supported event-source scaler kinds and their required trigger keys.
//!
//! Adding a scaler kind is a table update: add the variant, its name, and
//! its required keys. Trigger metadata beyond the required keys passes
//! through to the scaling policy untouched.

use crate::shared::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalerKind {
    RabbitMq,
    Kafka,
    Prometheus,
    Cron,
}

/// Required trigger metadata keys per scaler kind.
const SCALER_REQUIRED_KEYS: &[(ScalerKind, &[&str])] = &[
    (ScalerKind::RabbitMq, &["host", "queueName"]),
    (
        ScalerKind::Kafka,
        &["bootstrapServers", "consumerGroup", "topic"],
    ),
    (
        ScalerKind::Prometheus,
        &["serverAddress", "query", "threshold"],
    ),
    (
        ScalerKind::Cron,
        &["timezone", "start", "end", "desiredReplicas"],
    ),
];

impl ScalerKind {
    /// The trigger type string used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalerKind::RabbitMq => "rabbitmq",
            ScalerKind::Kafka => "kafka",
            ScalerKind::Prometheus => "prometheus",
            ScalerKind::Cron => "cron",
        }
    }

    pub fn required_keys(&self) -> &'static [&'static str] {
        SCALER_REQUIRED_KEYS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, keys)| *keys)
            .unwrap_or(&[])
    }

    pub fn supported_names() -> Vec<&'static str> {
        SCALER_REQUIRED_KEYS
            .iter()
            .map(|(kind, _)| kind.as_str())
            .collect()
    }
}

impl std::str::FromStr for ScalerKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rabbitmq" => Ok(ScalerKind::RabbitMq),
            "kafka" => Ok(ScalerKind::Kafka),
            "prometheus" => Ok(ScalerKind::Prometheus),
            "cron" => Ok(ScalerKind::Cron),
            _ => Err(ValidationError::unsupported("scaler_type", s)),
        }
    }
}

impl std::fmt::Display for ScalerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_known_kinds_round_trip() {
        for name in ScalerKind::supported_names() {
            let kind = ScalerKind::from_str(name).unwrap();
            assert_eq!(kind.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = ScalerKind::from_str("redis-streams").unwrap_err();
        assert_eq!(err.field(), "scaler_type");
    }

    #[test]
    fn test_every_kind_has_required_keys() {
        for name in ScalerKind::supported_names() {
            let kind = ScalerKind::from_str(name).unwrap();
            assert!(!kind.required_keys().is_empty());
        }
    }

    #[test]
    fn test_rabbitmq_required_keys() {
        assert_eq!(ScalerKind::RabbitMq.required_keys(), &["host", "queueName"]);
    }
}
