// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `snmp-mib get | next | bulk`: single requests through the agent.

use super::HostDevice;
use oid_registry::Oid;
use snmp_mib::{Request, Response, SnmpConfig};

/// Which request to send.
#[derive(Debug, Clone, Copy)]
pub enum Op {
    Get,
    Next,
    Bulk(usize),
}

pub async fn execute(config: SnmpConfig, op: Op, oid: &str, json: bool) -> anyhow::Result<()> {
    let oid: Oid = oid.parse()?;
    let mut device = HostDevice::start(config)?;
    let response = device.query(request(op, oid))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(&response))?);
    } else {
        print_response(&response);
    }
    Ok(())
}

fn request(op: Op, oid: Oid) -> Request {
    match op {
        Op::Get => Request::Get(oid),
        Op::Next => Request::GetNext(oid),
        Op::Bulk(max_repetitions) => Request::GetBulk {
            oid,
            max_repetitions,
        },
    }
}

pub(crate) fn print_response(response: &Response) {
    match response {
        Response::Value(vb) => println!("{vb}"),
        Response::NoSuchObject(oid) => {
            println!(".{oid} = No Such Object available on this agent at this OID")
        }
        Response::EndOfMibView(oid) => {
            println!(".{oid} = No more variables left in this MIB View")
        }
        Response::Bulk(vbs) => {
            for vb in vbs {
                println!("{vb}");
            }
        }
    }
}

fn to_json(response: &Response) -> serde_json::Value {
    match response {
        Response::Value(vb) => serde_json::json!(vb),
        Response::NoSuchObject(oid) => serde_json::json!({ "oid": oid, "error": "noSuchObject" }),
        Response::EndOfMibView(oid) => serde_json::json!({ "oid": oid, "error": "endOfMibView" }),
        Response::Bulk(vbs) => serde_json::json!(vbs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oid_registry::{oid, Value, VarBind};

    #[test]
    fn test_request_mapping() {
        assert_eq!(request(Op::Get, oid!(1, 3)), Request::Get(oid!(1, 3)));
        assert_eq!(request(Op::Next, oid!(1, 3)), Request::GetNext(oid!(1, 3)));
        assert_eq!(
            request(Op::Bulk(4), oid!(1, 3)),
            Request::GetBulk {
                oid: oid!(1, 3),
                max_repetitions: 4
            }
        );
    }

    #[test]
    fn test_json_shapes() {
        let vb = VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 7, 0), Value::Integer(64));
        let json = to_json(&Response::Value(vb));
        assert_eq!(json["oid"], "1.3.6.1.2.1.1.7.0");
        assert_eq!(json["value"]["type"], "integer");
        assert_eq!(json["value"]["value"], 64);

        let json = to_json(&Response::NoSuchObject(oid!(1, 3, 99)));
        assert_eq!(json["error"], "noSuchObject");
    }
}
