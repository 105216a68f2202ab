// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use alloy::primitives::U256;
use clap::{Parser, Subcommand};
use oxidity_hops::app::config::Settings;
use oxidity_hops::app::logging::setup_logging;
use oxidity_hops::common::time_utils::current_unix;
use oxidity_hops::domain::error::AppError;
use oxidity_hops::sandbox::Scenario;
use oxidity_hops::services::client::ExecutorClient;
use oxidity_hops::services::revert::decode_executor_revert;
use oxidity_hops::services::route::{RouteFile, apply_slippage, encode_execute_calldata};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "oxidity hops: atomic multi-hop swap executor tooling")]
struct Cli {
    /// Path to config file (default: ./config.toml if present)
    #[arg(long)]
    config: Option<String>,

    /// Emit JSON logs
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Slippage basis points applied to the final hop (overrides config/env)
    #[arg(long)]
    slippage_bps: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dry run a TOML scenario on the in-memory chain: simulate, then execute
    Sandbox {
        #[arg(long)]
        scenario: PathBuf,
    },
    /// Quote a route through the deployed executor's `simulate`
    Simulate {
        #[arg(long)]
        route: PathBuf,
    },
    /// eth_call `execute` from the configured caller and report the profit
    Preview {
        #[arg(long)]
        route: PathBuf,
    },
    /// Print `execute` calldata for a route
    Calldata {
        #[arg(long)]
        route: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut settings = Settings::load_with_path(cli.config.as_deref())?;
    if let Some(bps) = cli.slippage_bps {
        settings.slippage_bps = bps;
        settings.validate()?;
    }
    setup_logging(
        if settings.debug { "debug" } else { "info" },
        cli.json_logs || settings.log_json,
    );

    match cli.command {
        Command::Sandbox { scenario } => run_sandbox(&settings, &scenario),
        Command::Simulate { route } => run_simulate(&settings, &route).await,
        Command::Preview { route } => run_preview(&settings, &route).await,
        Command::Calldata { route } => run_calldata(&settings, &route),
    }
}

fn run_sandbox(settings: &Settings, path: &Path) -> Result<(), AppError> {
    let scenario = Scenario::load(path)?;
    let mut run = scenario.build()?;
    let chain = run.chain.as_ref();

    let amount = if run.request.amount_in.is_zero() {
        chain.balance_of(run.request.input_token, run.executor.address())
    } else {
        run.request.amount_in
    };
    let expected = run
        .executor
        .simulate(chain, &run.request.hops, run.request.input_token, amount)
        .map_err(|e| AppError::Execution(decode_executor_revert(&e.revert_data())))?;
    let slippage = scenario.route.effective_slippage(settings.slippage_bps)?;
    apply_slippage(&mut run.request, expected, slippage);

    let profit = run
        .executor
        .execute(chain, run.caller, &run.request)
        .map_err(|e| AppError::Execution(decode_executor_revert(&e.revert_data())))?;

    let events = chain.logs_for(run.executor.address()).len();
    tracing::info!(
        target: "sandbox",
        expected_out = %expected,
        %profit,
        events,
        "sandbox run complete"
    );
    println!("expected_out={expected} profit={profit}");
    Ok(())
}

async fn run_simulate(settings: &Settings, path: &Path) -> Result<(), AppError> {
    let route = RouteFile::load(path)?;
    let client = ExecutorClient::from_settings(settings)?;
    let hops = route.hops(current_unix(), settings.deadline_secs)?;
    let expected = client
        .simulate(&hops, route.input_token, route.amount_in.0)
        .await?;
    println!("{expected}");
    Ok(())
}

async fn run_preview(settings: &Settings, path: &Path) -> Result<(), AppError> {
    let route = RouteFile::load(path)?;
    let client = ExecutorClient::from_settings(settings)?;
    let mut request = route.to_request(client.caller(), current_unix(), settings.deadline_secs)?;

    let slippage = route.effective_slippage(settings.slippage_bps)?;
    if slippage > 0 && !request.amount_in.is_zero() {
        let expected = client
            .simulate(&request.hops, request.input_token, request.amount_in)
            .await?;
        apply_slippage(&mut request, expected, slippage);
    }

    let profit = client.preview_execute(&request).await?;
    let tx = client.build_execute_tx(&request);
    tracing::info!(target: "executor", gas = ?tx.gas, to = ?tx.to, "execute transaction ready");
    println!("{profit}");
    Ok(())
}

fn run_calldata(settings: &Settings, path: &Path) -> Result<(), AppError> {
    let route = RouteFile::load(path)?;
    let caller = settings.caller_address.unwrap_or_default();
    let request = route.to_request(caller, current_unix(), settings.deadline_secs)?;
    if request.recipient.is_zero() {
        return Err(AppError::Validation {
            field: "recipient".into(),
            message: "set `recipient` in the route or HOPS_CALLER_ADDRESS".into(),
        });
    }
    if request.min_profit == U256::ZERO {
        tracing::warn!(target: "config", "route has no min_profit floor");
    }
    println!("0x{}", hex::encode(encode_execute_calldata(&request)));
    Ok(())
}
