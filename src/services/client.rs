// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::app::config::Settings;
use crate::common::retry::retry_async_if;
use crate::domain::error::AppError;
use crate::infrastructure::data::executor::{Hop, HopExecutor};
use crate::infrastructure::network::provider::{ConnectionFactory, HttpProvider};
use crate::services::executor::ExecuteRequest;
use crate::services::revert::decode_executor_revert;
use crate::services::route::{encode_execute_calldata, encode_simulate_calldata};
use alloy::primitives::{Address, Bytes, I256, TxKind, U256};
use alloy::providers::Provider;
use alloy::rpc::types::eth::{TransactionInput, TransactionRequest};
use alloy::transports::TransportError;
use alloy_sol_types::SolCall;
use std::time::Duration;

const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);

/// Talks to a deployed executor over JSON-RPC: quotes and dry runs via
/// `eth_call`, plus ready-to-sign `execute` transactions.
pub struct ExecutorClient {
    provider: HttpProvider,
    executor: Address,
    caller: Address,
    simulate_gas_limit: u64,
    execute_gas_limit: u64,
    retry_attempts: usize,
}

impl ExecutorClient {
    pub fn new(provider: HttpProvider, executor: Address, caller: Address) -> Self {
        Self {
            provider,
            executor,
            caller,
            simulate_gas_limit: crate::domain::constants::DEFAULT_SIMULATE_GAS_LIMIT,
            execute_gas_limit: crate::domain::constants::DEFAULT_EXECUTE_GAS_LIMIT,
            retry_attempts: crate::domain::constants::DEFAULT_RPC_RETRY_ATTEMPTS,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let provider = ConnectionFactory::http(settings.require_rpc()?)?;
        let executor = settings.require_executor()?;
        let mut client = Self::new(provider, executor, settings.caller_address.unwrap_or_default());
        client.simulate_gas_limit = settings.simulate_gas_limit;
        client.execute_gas_limit = settings.execute_gas_limit;
        client.retry_attempts = settings.rpc_retry_attempts.max(1);
        Ok(client)
    }

    pub fn executor(&self) -> Address {
        self.executor
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    /// Quoted output of `hops` via the executor's read-only `simulate`.
    pub async fn simulate(&self, hops: &[Hop], input_token: Address, amount_in: U256) -> Result<U256, AppError> {
        let calldata = encode_simulate_calldata(hops, input_token, amount_in);
        let out = self.eth_call(calldata, self.simulate_gas_limit).await?;
        let expected = HopExecutor::simulateCall::abi_decode_returns(&out)
            .map_err(|e| AppError::Execution(format!("undecodable simulate return: {e}")))?;
        tracing::info!(target: "simulation", executor = %self.executor, hops = hops.len(), %amount_in, expected_out = %expected, "remote simulate");
        Ok(expected)
    }

    /// Dry run of `execute` from the caller; returns the profit it would report.
    pub async fn preview_execute(&self, request: &ExecuteRequest) -> Result<I256, AppError> {
        let out = self
            .eth_call(encode_execute_calldata(request), self.execute_gas_limit)
            .await?;
        let profit = HopExecutor::executeCall::abi_decode_returns(&out)
            .map_err(|e| AppError::Execution(format!("undecodable execute return: {e}")))?;
        tracing::info!(target: "executor", executor = %self.executor, %profit, "execute preview");
        Ok(profit)
    }

    /// Unsigned `execute` transaction; fees and nonce are left to the signer.
    pub fn build_execute_tx(&self, request: &ExecuteRequest) -> TransactionRequest {
        TransactionRequest {
            from: Some(self.caller),
            to: Some(TxKind::Call(self.executor)),
            gas: Some(self.execute_gas_limit),
            value: Some(U256::ZERO),
            input: TransactionInput::new(encode_execute_calldata(request)),
            ..Default::default()
        }
    }

    async fn eth_call(&self, calldata: Bytes, gas: u64) -> Result<Bytes, AppError> {
        let req = TransactionRequest {
            from: Some(self.caller),
            to: Some(TxKind::Call(self.executor)),
            gas: Some(gas),
            input: TransactionInput::new(calldata),
            ..Default::default()
        };

        let result = retry_async_if(
            |_| {
                let req = req.clone();
                async move { self.provider.call(req).await }
            },
            |e: &TransportError| !e.is_error_resp(),
            self.retry_attempts,
            RETRY_BASE_DELAY,
        )
        .await;

        result.map_err(|e| match e.as_error_resp().and_then(|p| p.as_revert_data()) {
            Some(data) => {
                let reason = decode_executor_revert(&data);
                tracing::warn!(target: "rpc", executor = %self.executor, %reason, "eth_call reverted");
                AppError::Execution(reason)
            }
            None if e.is_error_resp() => AppError::Execution(format!("eth_call failed: {e}")),
            None => AppError::Connection(format!("eth_call failed: {e}")),
        })
    }
}
