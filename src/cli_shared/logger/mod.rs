// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use tracing_subscriber::{EnvFilter, Registry, prelude::*};

use crate::cli_shared::cli::{CliOpts, LogConfig};

/// Installs the global subscriber: a console layer on stderr, so stdout
/// stays machine readable, and an hourly rolling file layer when
/// `--log-dir` is given.
pub fn setup_logger(opts: &CliOpts, log: &LogConfig) {
    let mut layers: Vec<Box<dyn tracing_subscriber::layer::Layer<Registry> + Send + Sync>> =
        // console logger
        vec![Box::new(
            tracing_subscriber::fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_filter(get_env_filter(default_env_filter(log))),
        )];

    // file logger
    if let Some(log_dir) = &opts.log_dir {
        let file_appender = tracing_appender::rolling::hourly(log_dir, "forest-chain.log");
        layers.push(Box::new(
            tracing_subscriber::fmt::Layer::new()
                .with_ansi(false)
                .with_writer(file_appender)
                .with_filter(get_env_filter(default_env_filter(log))),
        ));
    }

    if tracing_subscriber::registry().with(layers).try_init().is_err() {
        tracing::debug!("global subscriber already installed");
    }
}

/// Returns an [`EnvFilter`] according to the `RUST_LOG` environment variable, or a default
/// - see [`default_env_filter`]
fn get_env_filter(def: EnvFilter) -> EnvFilter {
    use std::env::{
        self,
        VarError::{NotPresent, NotUnicode},
    };
    match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(s) => EnvFilter::new(s),
        Err(NotPresent) => def,
        Err(NotUnicode(_)) => EnvFilter::default(),
    }
}

fn default_env_filter(log: &LogConfig) -> EnvFilter {
    let directives = log.to_filter_string();
    match directives.is_empty() {
        true => EnvFilter::new("info"),
        false => EnvFilter::new(format!("info,{directives}")),
    }
}
