// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared setup.

pub mod inspect;
pub mod run;

use anyhow::Context;
use runtime::RuntimeConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` overrides the `-v` count.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Merges the optional config file with the `--model` argument.
pub fn resolve_config(
    config: Option<PathBuf>,
    model: Option<PathBuf>,
) -> anyhow::Result<RuntimeConfig> {
    let mut resolved = match config {
        Some(path) => RuntimeConfig::from_file(&path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => {
            let model = model
                .clone()
                .context("either --model or --config must be given")?;
            RuntimeConfig::for_model(model)
        }
    };
    if let Some(model) = model {
        resolved.model_path = model;
    }
    tracing::debug!("resolved config: {resolved:?}");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_argument_required_without_config() {
        assert!(resolve_config(None, None).is_err());
    }

    #[test]
    fn test_model_argument_only() {
        let c = resolve_config(None, Some(PathBuf::from("m.json"))).unwrap();
        assert_eq!(c.model_path, PathBuf::from("m.json"));
        assert!(c.enable_profiling);
    }

    #[test]
    fn test_model_argument_overrides_config() {
        let path = std::env::temp_dir().join(format!("seqnet-cli-{}.toml", std::process::id()));
        std::fs::write(&path, "model_path = \"a.json\"\nbatch = 2\n").unwrap();
        let c = resolve_config(Some(path.clone()), Some(PathBuf::from("b.json"))).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(c.model_path, PathBuf::from("b.json"));
        assert_eq!(c.batch, Some(2));
    }
}
