// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # seqnet
//!
//! Command-line interface for sequential model descriptors.
//!
//! ## Usage
//! ```bash
//! # Print the layer chain with inferred shapes
//! seqnet inspect --model ./models/head.json
//!
//! # Run inference on a flat list of values (layout order)
//! seqnet run --model ./models/head.json --input values.json
//!
//! # Run on a constant input, batch of 4, JSON output
//! seqnet run --model ./models/head.json --fill 0.5 --batch 4 --json
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seqnet",
    about = "Sequential 4-D tensor inference from JSON model descriptors",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (CLI arguments take precedence).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run inference on a model.
    Run {
        /// Path to the JSON model descriptor.
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// JSON file holding a flat array of input values in layout order.
        #[arg(short, long, conflicts_with = "fill")]
        input: Option<PathBuf>,

        /// Fill the input with this constant instead of reading a file.
        #[arg(long, default_value_t = 0.0)]
        fill: f64,

        /// Batch size for a constant-filled input.
        #[arg(short, long, conflicts_with = "input")]
        batch: Option<usize>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Inspect a model: print the layer chain with inferred shapes.
    Inspect {
        /// Path to the JSON model descriptor.
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            model,
            input,
            fill,
            batch,
            json,
        } => {
            let mut config = commands::resolve_config(cli.config, model)?;
            if batch.is_some() {
                config.batch = batch;
            }
            commands::run::execute(config, input, fill, json)
        }
        Commands::Inspect { model } => {
            let config = commands::resolve_config(cli.config, model)?;
            commands::inspect::execute(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_conflicts_with_input() {
        let parsed = Cli::try_parse_from([
            "seqnet", "run", "--model", "m.json", "--input", "v.json", "--batch", "2",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_batch_with_fill() {
        let cli = Cli::try_parse_from([
            "seqnet", "run", "--model", "m.json", "--fill", "0.5", "--batch", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Run { batch, fill, input, .. } => {
                assert_eq!(batch, Some(2));
                assert_eq!(fill, 0.5);
                assert!(input.is_none());
            }
            Commands::Inspect { .. } => panic!("expected run"),
        }
    }
}
