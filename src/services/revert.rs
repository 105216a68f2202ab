// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::constants::MAX_REVERT_LOG_BYTES;
use crate::domain::error::ExecutorError;
use crate::infrastructure::data::executor::Permit2::Permit2Errors;
use alloy_sol_types::{Revert, SolError, SolInterface};

/// Human-readable reason for executor revert bytes.
pub fn decode_executor_revert(revert_data: &[u8]) -> String {
    if revert_data.is_empty() {
        return "Reverted with no data (OOG or empty)".to_string();
    }

    if let Some(err) = ExecutorError::from_revert_data(revert_data) {
        return match err {
            ExecutorError::InsufficientProfit { profit, min_profit } => {
                format!("INSUFFICIENT PROFIT: net {profit} below floor {min_profit}")
            }
            ExecutorError::BadProtocol { protocol } => {
                format!("Unsupported protocol tag {protocol} (expected 1=v2, 2=v3, 3=solidly)")
            }
            ExecutorError::ZeroInput { hop } => {
                format!("Hop {hop} resolved to zero input (empty balance for sentinel amount?)")
            }
            ExecutorError::TransferFromFailed { token } => {
                format!("transferFrom failed for token {token:?} (missing approval?)")
            }
            other => other.to_string(),
        };
    }

    if let Ok(decoded) = Permit2Errors::abi_decode(revert_data) {
        return match decoded {
            Permit2Errors::SignatureExpired(e) => {
                format!("Permit2: signature expired at {}", e.signatureDeadline)
            }
            Permit2Errors::InvalidNonce(_) => "Permit2: nonce already used".to_string(),
            Permit2Errors::InvalidAmount(e) => {
                format!("Permit2: requested amount above permitted {}", e.maxAmount)
            }
            Permit2Errors::InvalidSigner(_) => "Permit2: invalid signature".to_string(),
        };
    }

    if let Ok(decoded) = Revert::abi_decode(revert_data) {
        return format!("Standard Revert: {}", decoded.reason());
    }

    let shown = &revert_data[..revert_data.len().min(MAX_REVERT_LOG_BYTES)];
    format!("Unknown Revert: 0x{}", hex::encode(shown))
}
