// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::path::Path;

use assert_cmd::{Command, cargo::cargo_bin_cmd};

pub fn cli() -> Command {
    cargo_bin_cmd!("forest-chain")
}

pub trait CommonArgs {
    fn common_args(&mut self, data_dir: &Path) -> &mut Self;
}

impl CommonArgs for Command {
    /// Points the command at a scratch data directory with a quiet console.
    fn common_args(&mut self, data_dir: &Path) -> &mut Self {
        self.env_remove(forest_chain_store::cli_shared::cli::CONFIG_PATH_ENV)
            .env("RUST_LOG", "off")
            .arg("--data-dir")
            .arg(data_dir)
    }
}

/// Runs `init` and returns the genesis CID it printed.
pub fn init(data_dir: &Path) -> String {
    let output = cli()
        .common_args(data_dir)
        .arg("init")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap().trim().to_string()
}
