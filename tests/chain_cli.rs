// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod common;

use std::sync::Arc;

use forest_chain_store::cli_shared::open_chain_store;
use forest_chain_store::{Block, Client, Config, Tipset, TipsetKey};
use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::{CommonArgs, cli, init};

fn stdout_of(args: &[&str], data_dir: &TempDir) -> String {
    let output = cli()
        .common_args(data_dir.path())
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn head_before_init_fails() {
    let data_dir = TempDir::new().unwrap();
    cli()
        .common_args(data_dir.path())
        .args(["chain", "head"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("heaviest tipset not found"));
}

#[test]
fn init_sets_genesis_as_head() {
    let data_dir = TempDir::new().unwrap();
    let genesis = init(data_dir.path());

    let head: Vec<String> =
        serde_json::from_str(&stdout_of(&["chain", "head"], &data_dir)).unwrap();
    assert_eq!(head, vec![genesis]);
}

#[test]
fn init_twice_yields_same_genesis() {
    let data_dir = TempDir::new().unwrap();
    let first = init(data_dir.path());
    let second = init(data_dir.path());
    assert_eq!(first, second);
}

#[test]
fn genesis_depends_on_network_name() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let genesis_a = init(a.path());
    let output = cli()
        .common_args(b.path())
        .args(["--network-name", "othernet", "init"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_ne!(String::from_utf8(output).unwrap().trim(), genesis_a);
}

#[test]
fn ls_prints_genesis_tipset() {
    let data_dir = TempDir::new().unwrap();
    let genesis = init(data_dir.path());

    let stdout = stdout_of(&["chain", "ls", "--timeout", "5"], &data_dir);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let tipset: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(tipset[0]["Height"], 0);
    assert_eq!(tipset[0]["Parents"], serde_json::Value::Null);

    let block: serde_json::Value =
        serde_json::from_str(&stdout_of(&["chain", "block", &genesis], &data_dir)).unwrap();
    assert_eq!(block, tipset[0]);
}

#[test]
fn dag_get_prints_block_or_hex() {
    let data_dir = TempDir::new().unwrap();
    let genesis = init(data_dir.path());

    let block: serde_json::Value =
        serde_json::from_str(&stdout_of(&["dag", "get", &genesis], &data_dir)).unwrap();
    let state_root = block["StateRoot"]["/"].as_str().unwrap().to_string();

    let state = stdout_of(&["dag", "get", &state_root], &data_dir);
    assert!(hex::decode(state.trim()).is_ok(), "{state}");
}

#[test]
fn set_head_to_unknown_tipset_fails() {
    let data_dir = TempDir::new().unwrap();
    let genesis = init(data_dir.path());
    let elsewhere = TempDir::new().unwrap();
    let unknown = String::from_utf8(
        cli()
            .common_args(elsewhere.path())
            .args(["--network-name", "othernet", "init"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone(),
    )
    .unwrap();

    cli()
        .common_args(data_dir.path())
        .args(["chain", "set-head", unknown.trim()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tipset not found"));

    cli()
        .common_args(data_dir.path())
        .args(["chain", "set-head", &genesis])
        .assert()
        .success();
}

#[test]
fn ls_fails_on_missing_parent() {
    let data_dir = TempDir::new().unwrap();
    let genesis = init(data_dir.path());
    let config = Config {
        client: Client {
            data_dir: data_dir.path().to_path_buf(),
            ..Default::default()
        },
        ..Default::default()
    };
    let missing = Block {
        parents: TipsetKey::from(genesis.parse::<cid::Cid>().unwrap()),
        height: 1,
        nonce: 1,
        ..Default::default()
    };
    let head = Block {
        parents: TipsetKey::from(missing.cid()),
        height: 2,
        ..Default::default()
    };
    {
        let cs = open_chain_store(&config).unwrap();
        cs.set_head(Arc::new(Tipset::from(head))).unwrap();
    }

    let output = cli()
        .common_args(data_dir.path())
        .args(["chain", "ls", "--timeout", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!(
            "failed to get block {}",
            missing.cid()
        )))
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let tipset: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(tipset[0]["Height"], 2);
}
