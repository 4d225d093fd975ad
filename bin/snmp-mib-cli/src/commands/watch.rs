// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `snmp-mib watch`: re-read identifiers on an interval.
//!
//! Each round refreshes the host readings, then queries every identifier
//! through the agent. Runs until `count` rounds are done or Ctrl-C.

use super::get::print_response;
use super::HostDevice;
use oid_registry::Oid;
use snmp_mib::{Request, SnmpConfig};
use std::future::Future;
use std::time::Duration;

pub async fn execute(
    config: SnmpConfig,
    oids: Vec<String>,
    interval_ms: u64,
    count: Option<u64>,
) -> anyhow::Result<()> {
    let oids = oids
        .iter()
        .map(|s| s.parse::<Oid>())
        .collect::<Result<Vec<_>, _>>()?;
    let mut device = HostDevice::start(config)?;

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    run_rounds(
        Duration::from_millis(interval_ms.max(1)),
        count,
        interrupted,
        |round| {
            device.refresh();
            println!("-- round {round}");
            for oid in &oids {
                let response = device.query(Request::Get(oid.clone()))?;
                print_response(&response);
            }
            Ok(())
        },
    )
    .await?;
    Ok(())
}

/// Runs `round` once per tick until `count` rounds are done or `shutdown`
/// resolves. `shutdown` is polled across rounds, so a signal raised while
/// a round is running stops the loop before the next one. Returns the
/// number of completed rounds.
async fn run_rounds<F, R>(
    interval: Duration,
    count: Option<u64>,
    shutdown: F,
    mut round: R,
) -> anyhow::Result<u64>
where
    F: Future<Output = ()>,
    R: FnMut(u64) -> anyhow::Result<()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);
    let mut done = 0u64;
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                tracing::info!("interrupted after {done} rounds");
                break;
            }
            _ = ticker.tick() => {}
        }

        done += 1;
        round(done)?;

        if count.is_some_and(|n| done >= n) {
            break;
        }
    }
    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_stops_after_count() {
        let rounds = run_rounds(
            Duration::from_millis(1),
            Some(3),
            std::future::pending(),
            |_| Ok(()),
        )
        .await
        .unwrap();
        assert_eq!(rounds, 3);
    }

    #[tokio::test]
    async fn test_shutdown_during_round_is_not_lost() {
        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        let shutdown = async {
            let _ = rx.await;
        };

        let rounds = run_rounds(Duration::from_millis(20), None, shutdown, |round| {
            if round == 2 {
                if let Some(tx) = tx.take() {
                    let _ = tx.send(());
                }
            }
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(rounds, 2);
    }

    #[tokio::test]
    async fn test_round_error_propagates() {
        let result = run_rounds(
            Duration::from_millis(1),
            None,
            std::future::pending(),
            |round| {
                if round == 2 {
                    anyhow::bail!("query failed");
                }
                Ok(())
            },
        )
        .await;
        assert!(result.is_err());
    }
}
