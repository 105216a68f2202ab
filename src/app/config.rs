// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants;
use crate::domain::error::AppError;
use alloy::primitives::Address;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "HOPS";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    // General
    #[serde(default = "default_debug")]
    pub debug: bool,
    #[serde(default)]
    pub log_json: bool,

    // RPC
    pub rpc_url: Option<String>,
    #[serde(default = "default_retry_attempts")]
    pub rpc_retry_attempts: usize,

    // Executor
    pub executor_address: Option<Address>,
    /// `from` of eth_call previews and built transactions.
    pub caller_address: Option<Address>,
    #[serde(default = "default_permit2")]
    pub permit2_address: Address,

    // Transaction
    #[serde(default = "default_simulate_gas")]
    pub simulate_gas_limit: u64,
    #[serde(default = "default_execute_gas")]
    pub execute_gas_limit: u64,
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    #[serde(default)]
    pub slippage_bps: u32,
}

fn default_debug() -> bool {
    false
}

fn default_retry_attempts() -> usize {
    constants::DEFAULT_RPC_RETRY_ATTEMPTS
}

fn default_permit2() -> Address {
    constants::PERMIT2
}

fn default_simulate_gas() -> u64 {
    constants::DEFAULT_SIMULATE_GAS_LIMIT
}

fn default_execute_gas() -> u64 {
    constants::DEFAULT_EXECUTE_GAS_LIMIT
}

fn default_deadline_secs() -> u64 {
    constants::DEFAULT_DEADLINE_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: default_debug(),
            log_json: false,
            rpc_url: None,
            rpc_retry_attempts: default_retry_attempts(),
            executor_address: None,
            caller_address: None,
            permit2_address: default_permit2(),
            simulate_gas_limit: default_simulate_gas(),
            execute_gas_limit: default_execute_gas(),
            deadline_secs: default_deadline_secs(),
            slippage_bps: 0,
        }
    }
}

impl Settings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        if let Some(selected_path) = path {
            builder = builder.add_source(File::from(Path::new(selected_path)).required(true));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }
        // Env overrides the file; CLI flags override both in main.
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(
            target: "config",
            file = path.unwrap_or("config.toml (optional)"),
            rpc = settings.rpc_url.is_some(),
            executor = ?settings.executor_address,
            "settings loaded"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if u64::from(self.slippage_bps) > constants::BPS_DENOMINATOR {
            return Err(AppError::Validation {
                field: "slippage_bps".into(),
                message: format!("must be <= {}", constants::BPS_DENOMINATOR),
            });
        }
        if self.simulate_gas_limit == 0 {
            return Err(AppError::Validation {
                field: "simulate_gas_limit".into(),
                message: "must be nonzero".into(),
            });
        }
        if self.execute_gas_limit == 0 {
            return Err(AppError::Validation {
                field: "execute_gas_limit".into(),
                message: "must be nonzero".into(),
            });
        }
        Ok(())
    }

    pub fn require_rpc(&self) -> Result<&str, AppError> {
        self.rpc_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Config("HOPS_RPC_URL is missing".to_string()))
    }

    pub fn require_executor(&self) -> Result<Address, AppError> {
        self.executor_address
            .filter(|a| !a.is_zero())
            .ok_or_else(|| AppError::Config("HOPS_EXECUTOR_ADDRESS is missing".to_string()))
    }
}
