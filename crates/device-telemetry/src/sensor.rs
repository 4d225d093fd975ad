// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Externally attached sensors.
//!
//! The MIB only needs two things from a sensor: whether it has produced a
//! valid reading yet, and what that reading is.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Minimal sensor contract consumed by the MIB.
pub trait Sensor: Send + Sync {
    fn has_state(&self) -> bool;
    /// The latest reading. Meaningless unless [`has_state`](Self::has_state).
    fn state(&self) -> f32;

    /// The latest reading if one exists.
    fn reading(&self) -> Option<f32> {
        self.has_state().then(|| self.state())
    }
}

/// A lock-free published sensor value.
///
/// Readings are stored as raw `f32` bits so publishing and reading never
/// block the poll loop. A NaN publish invalidates the cell.
#[derive(Debug, Default)]
pub struct SensorCell {
    bits: AtomicU32,
    valid: AtomicBool,
}

impl SensorCell {
    /// Creates a cell with no reading.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reading(value: f32) -> Self {
        let cell = Self::new();
        cell.publish(value);
        cell
    }

    pub fn publish(&self, value: f32) {
        if value.is_nan() {
            self.invalidate();
            return;
        }
        self.bits.store(value.to_bits(), Ordering::Relaxed);
        self.valid.store(true, Ordering::Release);
    }

    pub fn invalidate(&self) {
        self.valid.store(false, Ordering::Release);
    }
}

impl Sensor for SensorCell {
    fn has_state(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    fn state(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
