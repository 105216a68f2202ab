// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::infrastructure::data::executor::HopExecutor::{self, HopExecutorErrors};
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolError, SolInterface};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection failed to endpoint: {0}")]
    Connection(String),

    #[error("Validation failed for field {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Route error: {0}")]
    Route(String),

    #[error("Execution reverted: {0}")]
    Execution(String),

    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Failure of an executor entry point. Every variant aborts the whole call and
/// rolls back all state it touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("no hops supplied")]
    NoHops,

    #[error("recipient is the zero address")]
    BadRecipient,

    #[error("hop {hop} resolved to a zero input amount")]
    ZeroInput { hop: usize },

    #[error("unsupported protocol tag {protocol}")]
    BadProtocol { protocol: u8 },

    #[error("net profit {profit} below floor {min_profit}")]
    InsufficientProfit { profit: U256, min_profit: U256 },

    #[error("entry point is locked")]
    Reentrant,

    #[error("caller is not the owner")]
    OnlyOwner,

    #[error("transfer of {token} failed")]
    TransferFailed { token: Address },

    #[error("transferFrom of {token} failed")]
    TransferFromFailed { token: Address },

    #[error("approve of {token} for {spender} failed")]
    ApproveFailed { token: Address, spender: Address },

    #[error("balance query on {token} failed")]
    BalanceQueryFailed { token: Address },

    /// External call reverted; its payload is bubbled unchanged.
    #[error("call to {target} reverted: 0x{}", hex::encode(.data))]
    CallReverted { target: Address, data: Bytes },
}

impl ExecutorError {
    /// ABI revert payload surfaced to the caller of the entry point.
    pub fn revert_data(&self) -> Bytes {
        let encoded = match self {
            Self::NoHops => HopExecutor::NoHops {}.abi_encode(),
            Self::BadRecipient => HopExecutor::BadRecipient {}.abi_encode(),
            Self::ZeroInput { hop } => HopExecutor::ZeroInput {
                hop: U256::from(*hop),
            }
            .abi_encode(),
            Self::BadProtocol { protocol } => HopExecutor::BadProtocol {
                protocol: *protocol,
            }
            .abi_encode(),
            Self::InsufficientProfit { profit, min_profit } => HopExecutor::InsufficientProfit {
                profit: *profit,
                minProfit: *min_profit,
            }
            .abi_encode(),
            Self::Reentrant => HopExecutor::Reentrant {}.abi_encode(),
            Self::OnlyOwner => HopExecutor::OnlyOwner {}.abi_encode(),
            Self::TransferFailed { token } => {
                HopExecutor::TransferFailed { token: *token }.abi_encode()
            }
            Self::TransferFromFailed { token } => {
                HopExecutor::TransferFromFailed { token: *token }.abi_encode()
            }
            Self::ApproveFailed { token, spender } => HopExecutor::ApproveFailed {
                token: *token,
                spender: *spender,
            }
            .abi_encode(),
            Self::BalanceQueryFailed { token } => {
                HopExecutor::BalanceQueryFailed { token: *token }.abi_encode()
            }
            Self::CallReverted { data, .. } => return data.clone(),
        };
        Bytes::from(encoded)
    }

    /// Decode an executor custom error from revert bytes. Bubbled reverts from
    /// nested calls decode to the innermost executor error they carry.
    pub fn from_revert_data(data: &[u8]) -> Option<Self> {
        let decoded = HopExecutorErrors::abi_decode(data).ok()?;
        Some(match decoded {
            HopExecutorErrors::NoHops(_) => Self::NoHops,
            HopExecutorErrors::BadRecipient(_) => Self::BadRecipient,
            HopExecutorErrors::ZeroInput(e) => Self::ZeroInput {
                hop: e.hop.saturating_to::<usize>(),
            },
            HopExecutorErrors::BadProtocol(e) => Self::BadProtocol {
                protocol: e.protocol,
            },
            HopExecutorErrors::InsufficientProfit(e) => Self::InsufficientProfit {
                profit: e.profit,
                min_profit: e.minProfit,
            },
            HopExecutorErrors::Reentrant(_) => Self::Reentrant,
            HopExecutorErrors::OnlyOwner(_) => Self::OnlyOwner,
            HopExecutorErrors::TransferFailed(e) => Self::TransferFailed { token: e.token },
            HopExecutorErrors::TransferFromFailed(e) => {
                Self::TransferFromFailed { token: e.token }
            }
            HopExecutorErrors::ApproveFailed(e) => Self::ApproveFailed {
                token: e.token,
                spender: e.spender,
            },
            HopExecutorErrors::BalanceQueryFailed(e) => {
                Self::BalanceQueryFailed { token: e.token }
            }
        })
    }

    /// The executor error behind this one, looking through bubbled reverts.
    pub fn root_cause(&self) -> Self {
        match self {
            Self::CallReverted { data, .. } => {
                Self::from_revert_data(data).unwrap_or_else(|| self.clone())
            }
            other => other.clone(),
        }
    }
}
