// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::ExecutorError;
use crate::infrastructure::data::executor::Hop;
use crate::services::executor::adapters::Adapter;
use crate::services::executor::custody::Custody;
use alloy::primitives::U256;

/// Quote a hop sequence without touching custody. A zero `amountIn` carries the
/// previous quote forward, never a live balance, so results can drift from what
/// `execute` would actually produce when the quotes are off.
pub fn quote_route(custody: &Custody<'_>, hops: &[Hop], amount_in: U256) -> Result<U256, ExecutorError> {
    if hops.is_empty() {
        return Err(ExecutorError::NoHops);
    }

    let mut amt = amount_in;
    for (index, hop) in hops.iter().enumerate() {
        let amount = if hop.amountIn.is_zero() { amt } else { hop.amountIn };
        if amount.is_zero() {
            return Err(ExecutorError::ZeroInput { hop: index });
        }
        let adapter = Adapter::from_tag(hop.protocol)?;
        amt = adapter.quote(custody, hop, amount)?;
        tracing::trace!(
            target: "simulation",
            hop = index,
            protocol = adapter.name(),
            amount_in = %amount,
            amount_out = %amt,
            "hop quoted"
        );
    }
    Ok(amt)
}
