// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use alloy::primitives::I256;
use oxidity_hops::sandbox::Scenario;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

const SCENARIO_DIR: &str = "scenarios";

fn checked_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = ["config.toml", "config.prod.toml", "config.dev.toml", ".env"]
        .iter()
        .map(PathBuf::from)
        .filter(|p| p.exists())
        .collect();
    if let Ok(entries) = fs::read_dir(SCENARIO_DIR) {
        let mut scenarios: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        scenarios.sort();
        files.extend(scenarios);
    }
    files
}

/// Fail CI if config or scenario files contain 64-hex private keys.
#[test]
fn no_committed_hex_keys_in_configs() {
    let re = Regex::new(r"(?i)\b(0x)?[a-f0-9]{64}\b").unwrap();
    for file in checked_files() {
        let body = fs::read_to_string(&file).expect("read config");
        for (idx, line) in body.lines().enumerate() {
            if re.is_match(line) {
                panic!("Secret-looking hex in {} at line {}", file.display(), idx + 1);
            }
        }
    }
}

/// Every shipped scenario must build and settle with a non-negative profit.
#[test]
fn shipped_scenarios_run_clean() {
    if !Path::new(SCENARIO_DIR).exists() {
        return;
    }
    for file in checked_files()
        .into_iter()
        .filter(|p| p.starts_with(SCENARIO_DIR))
    {
        let scenario = Scenario::load(&file).expect("parse scenario");
        let run = scenario.build().expect("build scenario");
        let profit = run
            .executor
            .execute(run.chain.as_ref(), run.caller, &run.request)
            .unwrap_or_else(|e| panic!("{} failed: {e}", file.display()));
        assert!(profit >= I256::ZERO, "{}", file.display());
    }
}
