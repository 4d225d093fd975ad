// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Typed values returned to the protocol agent.

use crate::Oid;
use std::fmt;

/// The declared type of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Integer,
    OctetString,
    ObjectIdentifier,
    /// Hundredths of a second (SNMP `TimeTicks`).
    Timestamp,
}

impl ValueKind {
    /// The value substituted when a dynamic source has nothing to report.
    pub fn default_value(self) -> Value {
        match self {
            ValueKind::Integer => Value::Integer(0),
            ValueKind::OctetString => Value::OctetString(String::new()),
            ValueKind::ObjectIdentifier => Value::ObjectIdentifier(Oid::new(vec![0, 0])),
            ValueKind::Timestamp => Value::TimeTicks(0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Integer => "INTEGER",
            ValueKind::OctetString => "STRING",
            ValueKind::ObjectIdentifier => "OID",
            ValueKind::Timestamp => "Timeticks",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Integer(i32),
    OctetString(String),
    ObjectIdentifier(Oid),
    TimeTicks(u32),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::OctetString(_) => ValueKind::OctetString,
            Value::ObjectIdentifier(_) => ValueKind::ObjectIdentifier,
            Value::TimeTicks(_) => ValueKind::Timestamp,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::OctetString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    pub fn as_ticks(&self) -> Option<u32> {
        match self {
            Value::TimeTicks(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "INTEGER: {v}"),
            Value::OctetString(s) => write!(f, "STRING: \"{s}\""),
            Value::ObjectIdentifier(oid) => write!(f, "OID: .{oid}"),
            Value::TimeTicks(t) => {
                let secs = t / 100;
                write!(
                    f,
                    "Timeticks: ({t}) {}:{:02}:{:02}:{:02}.{:02}",
                    secs / 86_400,
                    (secs / 3600) % 24,
                    (secs / 60) % 60,
                    secs % 60,
                    t % 100,
                )
            }
        }
    }
}

/// An identifier paired with its rendered value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct VarBind {
    pub oid: Oid,
    pub value: Value,
}

impl VarBind {
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }
}

impl fmt::Display for VarBind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{} = {}", self.oid, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_kind() {
        for kind in [
            ValueKind::Integer,
            ValueKind::OctetString,
            ValueKind::ObjectIdentifier,
            ValueKind::Timestamp,
        ] {
            assert_eq!(kind.default_value().kind(), kind);
        }
    }

    #[test]
    fn test_defaults_are_zero_or_empty() {
        assert_eq!(ValueKind::Integer.default_value(), Value::Integer(0));
        assert_eq!(
            ValueKind::OctetString.default_value(),
            Value::OctetString(String::new())
        );
        assert_eq!(ValueKind::Timestamp.default_value(), Value::TimeTicks(0));
    }

    #[test]
    fn test_timeticks_display() {
        // 1 day, 2 h, 3 min, 4.05 s
        let ticks = ((86_400 + 2 * 3600 + 3 * 60 + 4) * 100 + 5) as u32;
        let s = Value::TimeTicks(ticks).to_string();
        assert!(s.ends_with("1:02:03:04.05"), "got {s}");
    }

    #[test]
    fn test_varbind_display() {
        let vb = VarBind::new(Oid::from_slice(&[1, 3, 6]), Value::Integer(7));
        assert_eq!(vb.to_string(), ".1.3.6 = INTEGER: 7");
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Value::OctetString("FLASH".into())).unwrap();
        assert_eq!(json, r#"{"type":"octet_string","value":"FLASH"}"#);
    }
}
