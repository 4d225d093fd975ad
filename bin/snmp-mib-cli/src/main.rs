// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # snmp-mib
//!
//! Command-line front end that serves the device MIB from the host.
//!
//! ## Usage
//! ```bash
//! # Walk the whole tree, or a subtree
//! snmp-mib walk
//! snmp-mib walk 1.3.9999 --json
//!
//! # Single lookups through the agent
//! snmp-mib get 1.3.6.1.2.1.1.5.0
//! snmp-mib next 1.3.6.1.2.1.25
//! snmp-mib bulk 1.3.6.1.2.1.25.2.3 -n 10
//!
//! # Re-read a few values every two seconds
//! snmp-mib watch 1.3.9999.32.2.0 1.3.6.1.2.1.25.1.1.0 --interval-ms 2000
//!
//! # Effective configuration and host status
//! snmp-mib -c device.toml config
//! snmp-mib status
//! ```

mod commands;

use clap::{Parser, Subcommand};
use commands::get::Op;
use commands::Overrides;

#[derive(Parser)]
#[command(
    name = "snmp-mib",
    about = "Serve and inspect the device telemetry MIB on a development host",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Override the device name (sysName).
    #[arg(long, global = true)]
    name: Option<String>,

    /// Override the device location (sysLocation).
    #[arg(long, global = true)]
    location: Option<String>,

    /// Override the read community.
    #[arg(long, global = true)]
    community: Option<String>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every entry at or below a prefix.
    Walk {
        /// Subtree to walk.
        #[arg(default_value = "1.3")]
        prefix: String,

        /// Emit a JSON array instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Exact-match lookup.
    Get {
        oid: String,

        #[arg(long)]
        json: bool,
    },

    /// The entry following an identifier.
    Next {
        oid: String,

        #[arg(long)]
        json: bool,
    },

    /// Successive entries following an identifier.
    Bulk {
        oid: String,

        /// Maximum number of entries returned.
        #[arg(short = 'n', long, default_value_t = 10)]
        max_repetitions: usize,

        #[arg(long)]
        json: bool,
    },

    /// Re-read identifiers on an interval until interrupted.
    Watch {
        /// Identifiers to read.
        #[arg(required = true)]
        oids: Vec<String>,

        /// Milliseconds between reads.
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Stop after this many rounds.
        #[arg(long)]
        count: Option<u64>,
    },

    /// Print the effective configuration as TOML.
    Config,

    /// Display host readings and a summary of the served tree.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let overrides = Overrides {
        name: cli.name,
        location: cli.location,
        community: cli.community,
    };
    let config = commands::load_config(cli.config.as_deref(), &overrides)?;

    match cli.command {
        Commands::Walk { prefix, json } => commands::walk::execute(config, &prefix, json).await,
        Commands::Get { oid, json } => commands::get::execute(config, Op::Get, &oid, json).await,
        Commands::Next { oid, json } => commands::get::execute(config, Op::Next, &oid, json).await,
        Commands::Bulk {
            oid,
            max_repetitions,
            json,
        } => commands::get::execute(config, Op::Bulk(max_repetitions), &oid, json).await,
        Commands::Watch {
            oids,
            interval_ms,
            count,
        } => commands::watch::execute(config, oids, interval_ms, count).await,
        Commands::Config => commands::config::execute(config).await,
        Commands::Status => commands::status::execute(config).await,
    }
}
