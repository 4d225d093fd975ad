// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Value conversions shared by the MIB adapters.

use std::fmt::Write;

/// Formats a hardware address as `AA:01:2B:03:04:05`.
pub fn format_mac(bytes: &[u8; 6]) -> String {
    let mut out = String::with_capacity(17);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(':');
        }
        // write! to String is infallible
        let _ = write!(out, "{b:02X}");
    }
    out
}

/// One-decimal fixed point: `23.7` becomes `237`.
///
/// The fractional remainder is truncated toward zero, so `21.45` becomes
/// `214` and `-0.55` becomes `-5`. Out-of-range values saturate.
pub fn scale_tenths(value: f32) -> i32 {
    (value * 10.0) as i32
}

/// Converts milliseconds to SNMP time ticks (hundredths of a second),
/// wrapping at 2^32 like the protocol counter.
pub fn ticks_from_millis(ms: u64) -> u32 {
    (ms / 10) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mac_zero_padded_upper() {
        assert_eq!(
            format_mac(&[0xAA, 0x1, 0x2B, 0x3, 0x4, 0x5]),
            "AA:01:2B:03:04:05"
        );
        assert_eq!(format_mac(&[0; 6]), "00:00:00:00:00:00");
        assert_eq!(format_mac(&[0xff; 6]), "FF:FF:FF:FF:FF:FF");
    }

    #[test]
    fn test_scale_tenths_truncates() {
        assert_eq!(scale_tenths(21.45), 214);
        assert_eq!(scale_tenths(23.7), 237);
        assert_eq!(scale_tenths(0.0), 0);
        assert_eq!(scale_tenths(-0.55), -5);
        assert_eq!(scale_tenths(55.99), 559);
    }

    #[test]
    fn test_scale_tenths_saturates() {
        assert_eq!(scale_tenths(f32::MAX), i32::MAX);
        assert_eq!(scale_tenths(f32::NAN), 0);
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks_from_millis(0), 0);
        assert_eq!(ticks_from_millis(1234), 123);
        // 2^32 ticks wraps.
        assert_eq!(ticks_from_millis(42_949_672_960 + 50), 5);
    }
}
