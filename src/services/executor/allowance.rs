// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::ExecutorError;
use crate::services::executor::custody::Custody;
use alloy::primitives::{Address, U256};

/// Raise `spender`'s allowance over the executor's `token` to the maximum when it
/// cannot cover `amount`. The grant is always zero first, then max: some tokens
/// reject a nonzero to nonzero change. Returns whether a grant happened.
pub fn approve_if_needed(
    custody: &Custody<'_>,
    token: Address,
    spender: Address,
    amount: U256,
) -> Result<bool, ExecutorError> {
    let current = custody.allowance(token, spender)?;
    if current >= amount {
        tracing::trace!(target: "allowance", %token, %spender, %current, "allowance sufficient");
        return Ok(false);
    }

    custody.approve(token, spender, U256::ZERO)?;
    custody.approve(token, spender, U256::MAX)?;
    tracing::debug!(target: "allowance", %token, %spender, %amount, "allowance raised to max");
    Ok(true)
}
