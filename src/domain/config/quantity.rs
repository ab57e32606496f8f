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

//! Parsing for Kubernetes resource quantity strings.
//!
//! Only the subset used for request/limit comparison is implemented:
//! CPU quantities normalize to millicores, memory quantities to bytes.

/// Parse a CPU quantity ("500m", "0.5", "2") into millicores.
pub fn parse_cpu_millis(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("empty CPU quantity");
    }

    if let Some(num_str) = s.strip_suffix('m') {
        let millis: u64 = num_str
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid CPU quantity '{}'", s))?;
        return Ok(millis);
    }

    let cores: f64 = s
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid CPU quantity '{}'", s))?;
    if cores < 0.0 || !cores.is_finite() {
        anyhow::bail!("invalid CPU quantity '{}'", s);
    }

    Ok((cores * 1000.0).round() as u64)
}

/// Parse a memory quantity ("128Mi", "1Gi", "500M", plain bytes) into bytes.
pub fn parse_memory_bytes(s: &str) -> anyhow::Result<u64> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("empty memory quantity");
    }

    let (num_str, unit) = if let Some(n) = s.strip_suffix("Ti") {
        (n, 1024u64 * 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("Gi") {
        (n, 1024u64 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix("Mi") {
        (n, 1024u64 * 1024)
    } else if let Some(n) = s.strip_suffix("Ki") {
        (n, 1024u64)
    } else if let Some(n) = s.strip_suffix('T') {
        (n, 1_000_000_000_000u64)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1_000_000_000u64)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1_000_000u64)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1_000u64)
    } else {
        (s, 1u64)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid memory quantity '{}'", s))?;

    Ok(num * unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_millicores_suffix() {
        assert_eq!(parse_cpu_millis("500m").unwrap(), 500);
        assert_eq!(parse_cpu_millis("100m").unwrap(), 100);
    }

    #[test]
    fn test_cpu_whole_and_fractional_cores() {
        assert_eq!(parse_cpu_millis("1").unwrap(), 1000);
        assert_eq!(parse_cpu_millis("0.5").unwrap(), 500);
        assert_eq!(parse_cpu_millis("2").unwrap(), 2000);
    }

    #[test]
    fn test_cpu_invalid() {
        assert!(parse_cpu_millis("").is_err());
        assert!(parse_cpu_millis("abc").is_err());
        assert!(parse_cpu_millis("-1").is_err());
        assert!(parse_cpu_millis("10x").is_err());
    }

    #[test]
    fn test_memory_binary_suffixes() {
        assert_eq!(parse_memory_bytes("1Ki").unwrap(), 1024);
        assert_eq!(parse_memory_bytes("128Mi").unwrap(), 128 * 1024 * 1024);
        assert_eq!(parse_memory_bytes("1Gi").unwrap(), 1024 * 1024 * 1024);
    }

    #[test]
    fn test_memory_decimal_suffixes_and_bytes() {
        assert_eq!(parse_memory_bytes("500M").unwrap(), 500_000_000);
        assert_eq!(parse_memory_bytes("1024").unwrap(), 1024);
    }

    #[test]
    fn test_memory_invalid() {
        assert!(parse_memory_bytes("").is_err());
        assert!(parse_memory_bytes("lots").is_err());
        assert!(parse_memory_bytes("12Qi").is_err());
    }

    #[test]
    fn test_request_limit_ordering() {
        assert!(parse_memory_bytes("128Mi").unwrap() <= parse_memory_bytes("256Mi").unwrap());
        assert!(parse_cpu_millis("250m").unwrap() <= parse_cpu_millis("0.5").unwrap());
    }
}
