// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host memory via `/proc/meminfo`.
//!
//! RAM stands in for the heap and swap stands in for the auxiliary memory
//! region when a development host emulates a board.

use crate::TelemetryError;
use std::path::Path;

/// Default path to the kernel memory info file.
pub(crate) const MEMINFO_PATH: &str = "/proc/meminfo";

/// Host memory state in bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    /// Available memory as estimated by the kernel (free + reclaimable).
    pub available_bytes: u64,
    pub used_bytes: u64,
    pub swap_total_bytes: u64,
    pub swap_free_bytes: u64,
}

impl MemoryInfo {
    /// Reads current memory information from `/proc/meminfo`.
    pub fn read() -> Result<Self, TelemetryError> {
        Self::read_from(Path::new(MEMINFO_PATH))
    }

    pub(crate) fn read_from(path: &Path) -> Result<Self, TelemetryError> {
        let content = std::fs::read_to_string(path).map_err(|e| TelemetryError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses `/proc/meminfo`-formatted text. `MemTotal` and `MemAvailable`
    /// are required; the swap fields default to zero.
    pub(crate) fn parse(content: &str, source_path: &Path) -> Result<Self, TelemetryError> {
        let mut total_kb: Option<u64> = None;
        let mut available_kb: Option<u64> = None;
        let mut swap_total_kb = 0;
        let mut swap_free_kb = 0;

        for line in content.lines() {
            let mut parts = line.split_whitespace();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            match key {
                "MemTotal:" => total_kb = Some(parse_kb_value(value, source_path)?),
                "MemAvailable:" => available_kb = Some(parse_kb_value(value, source_path)?),
                "SwapTotal:" => swap_total_kb = parse_kb_value(value, source_path)?,
                "SwapFree:" => swap_free_kb = parse_kb_value(value, source_path)?,
                _ => {}
            }
        }

        let total_kb = total_kb.ok_or_else(|| TelemetryError::ParseError {
            path: source_path.display().to_string(),
            detail: "MemTotal not found".to_string(),
        })?;
        let available_kb = available_kb.ok_or_else(|| TelemetryError::ParseError {
            path: source_path.display().to_string(),
            detail: "MemAvailable not found".to_string(),
        })?;

        let total_bytes = total_kb * 1024;
        let available_bytes = available_kb * 1024;

        Ok(Self {
            total_bytes,
            available_bytes,
            used_bytes: total_bytes.saturating_sub(available_bytes),
            swap_total_bytes: swap_total_kb * 1024,
            swap_free_bytes: swap_free_kb * 1024,
        })
    }

    pub fn total_kb(&self) -> u64 {
        self.total_bytes / 1024
    }
}

/// Parses a numeric string from `/proc/meminfo` (values are in kB).
fn parse_kb_value(s: &str, source_path: &Path) -> Result<u64, TelemetryError> {
    s.parse::<u64>().map_err(|_| TelemetryError::ParseError {
        path: source_path.display().to_string(),
        detail: format!("expected integer kB value, got '{s}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MEMINFO: &str = "\
MemTotal:        3884292 kB
MemFree:          218456 kB
MemAvailable:    2456780 kB
Buffers:          123456 kB
Cached:          1987654 kB
SwapCached:            0 kB
SwapTotal:        102396 kB
SwapFree:          92396 kB
";

    #[test]
    fn test_parse_meminfo() {
        let info = MemoryInfo::parse(SAMPLE_MEMINFO, Path::new(MEMINFO_PATH)).unwrap();
        assert_eq!(info.total_bytes, 3884292 * 1024);
        assert_eq!(info.available_bytes, 2456780 * 1024);
        assert_eq!(info.used_bytes, (3884292 - 2456780) * 1024);
        assert_eq!(info.swap_total_bytes, 102396 * 1024);
        assert_eq!(info.swap_free_bytes, 92396 * 1024);
        assert_eq!(info.total_kb(), 3884292);
    }

    #[test]
    fn test_swap_optional() {
        let info = MemoryInfo::parse(
            "MemTotal: 1000 kB\nMemAvailable: 400 kB\n",
            Path::new(MEMINFO_PATH),
        )
        .unwrap();
        assert_eq!(info.swap_total_bytes, 0);
    }

    #[test]
    fn test_missing_mem_available() {
        let incomplete = "MemTotal:        3884292 kB\nMemFree:          218456 kB\n";
        let result = MemoryInfo::parse(incomplete, Path::new(MEMINFO_PATH));
        assert!(matches!(result, Err(TelemetryError::ParseError { .. })));
    }

    #[test]
    fn test_bad_number() {
        let result = MemoryInfo::parse("MemTotal: lots kB\n", Path::new(MEMINFO_PATH));
        assert!(matches!(result, Err(TelemetryError::ParseError { .. })));
    }

    #[test]
    fn test_read_from_file() {
        let dir = std::env::temp_dir().join("snmp_mib_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("meminfo_test");
        std::fs::write(&path, SAMPLE_MEMINFO).unwrap();
        let info = MemoryInfo::read_from(&path).unwrap();
        assert_eq!(info.total_bytes, 3884292 * 1024);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_read_real_meminfo() {
        if Path::new(MEMINFO_PATH).exists() {
            let info = MemoryInfo::read().unwrap();
            assert!(info.total_bytes > 0);
            assert!(info.available_bytes <= info.total_bytes);
        }
    }
}
