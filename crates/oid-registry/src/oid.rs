// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Numeric object identifiers.
//!
//! An [`Oid`] is a sequence of `u32` arcs. Ordering is the derived `Vec`
//! ordering: arc-by-arc numeric comparison where a prefix sorts before its
//! extensions. That is exactly the order a get-next walk must follow, so
//! `1.3.6.1.2` < `1.3.6.1.10` even though the strings compare the other way.

use crate::RegistryError;
use std::fmt::{self, Write};
use std::str::FromStr;

/// A fully-resolved numeric OID.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid {
    arcs: Vec<u32>,
}

impl Oid {
    /// Creates an OID from a vector of arcs.
    #[must_use]
    pub fn new(arcs: Vec<u32>) -> Self {
        Self { arcs }
    }

    /// Creates an OID from a slice of arcs.
    #[must_use]
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: arcs.to_vec(),
        }
    }

    /// Parses dotted notation. A single leading dot is accepted, so
    /// `".1.3.6.1"` and `"1.3.6.1"` parse to the same OID.
    pub fn from_dotted(s: &str) -> Result<Self, RegistryError> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(RegistryError::InvalidOid {
                input: s.to_string(),
            });
        }
        body.split('.')
            .map(|arc| arc.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
            .map_err(|_| RegistryError::InvalidOid {
                input: s.to_string(),
            })
    }

    /// Renders dotted notation without a leading dot.
    #[must_use]
    pub fn to_dotted(&self) -> String {
        let mut out = String::with_capacity(self.arcs.len() * 4);
        for (i, arc) in self.arcs.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            // write! to String is infallible
            let _ = write!(out, "{arc}");
        }
        out
    }

    /// Returns a new OID with `arc` appended.
    #[must_use]
    pub fn child(&self, arc: u32) -> Self {
        let mut arcs = Vec::with_capacity(self.arcs.len() + 1);
        arcs.extend_from_slice(&self.arcs);
        arcs.push(arc);
        Self::new(arcs)
    }

    /// Returns a new OID with every arc of `suffix` appended.
    #[must_use]
    pub fn extend(&self, suffix: &[u32]) -> Self {
        let mut arcs = Vec::with_capacity(self.arcs.len() + suffix.len());
        arcs.extend_from_slice(&self.arcs);
        arcs.extend_from_slice(suffix);
        Self::new(arcs)
    }

    /// Checks whether this OID is a prefix of (or equal to) `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.arcs.starts_with(&self.arcs)
    }

    #[must_use]
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dotted())
    }
}

impl FromStr for Oid {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dotted(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs.to_vec())
    }
}

impl serde::Serialize for Oid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_dotted())
    }
}

impl<'de> serde::Deserialize<'de> for Oid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_dotted(&s).map_err(serde::de::Error::custom)
    }
}

/// Builds an [`Oid`] from literal arcs: `oid!(1, 3, 6, 1, 2, 1)`.
#[macro_export]
macro_rules! oid {
    ($($arc:expr),+ $(,)?) => {
        $crate::Oid::new(vec![$($arc as u32),+])
    };
}
