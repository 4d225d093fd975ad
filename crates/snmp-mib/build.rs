// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Stamps the compile time into `SNMP_MIB_BUILD_TIMESTAMP` for `sysDescr`.
//!
//! Honors `SOURCE_DATE_EPOCH` so reproducible builds report a fixed time.

use chrono::{DateTime, Utc};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let stamp = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    println!(
        "cargo:rustc-env=SNMP_MIB_BUILD_TIMESTAMP={}",
        stamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
