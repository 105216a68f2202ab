// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::ExecutorError;
use crate::services::executor::custody::Custody;
use alloy::primitives::{Address, I256, U256};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Terminal-token balance gained over the baseline.
    pub gross: U256,
    pub net: U256,
    /// Leftover input token swept after the gain.
    pub residual_input: U256,
}

impl Settlement {
    /// Net gain as the signed result of `execute`, saturating at `I256::MAX`.
    pub fn profit(&self) -> I256 {
        if self.net > I256::MAX.into_raw() {
            I256::MAX
        } else {
            I256::from_raw(self.net)
        }
    }
}

/// Net gain for a route: round trips subtract the principal, floored at zero;
/// cross-token routes report the raw terminal-token gain.
pub fn net_gain(gross: U256, amount_in: U256, round_trip: bool) -> U256 {
    if round_trip {
        gross.saturating_sub(amount_in)
    } else {
        gross
    }
}

pub struct SettleParams {
    pub input_token: Address,
    pub terminal_token: Address,
    pub amount_in: U256,
    pub baseline: U256,
    pub min_profit: U256,
    pub recipient: Address,
}

/// Measure the gain, enforce the profit floor and pay everything out.
pub fn settle(custody: &Custody<'_>, params: &SettleParams) -> Result<Settlement, ExecutorError> {
    let after = custody.own_balance(params.terminal_token)?;
    let gross = after.saturating_sub(params.baseline);
    let round_trip = params.input_token == params.terminal_token;
    let net = net_gain(gross, params.amount_in, round_trip);

    if net < params.min_profit {
        tracing::debug!(
            target: "settlement",
            %gross,
            %net,
            min_profit = %params.min_profit,
            "profit below floor"
        );
        return Err(ExecutorError::InsufficientProfit {
            profit: net,
            min_profit: params.min_profit,
        });
    }

    if !gross.is_zero() {
        custody.transfer(params.terminal_token, params.recipient, gross)?;
    }

    // Custody ends empty of the input token, round trip or not.
    let residual_input = custody.own_balance(params.input_token)?;
    if !residual_input.is_zero() {
        custody.transfer(params.input_token, params.recipient, residual_input)?;
    }

    tracing::debug!(
        target: "settlement",
        recipient = %params.recipient,
        %gross,
        %net,
        %residual_input,
        "settled"
    );
    Ok(Settlement {
        gross,
        net,
        residual_input,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_floors_at_zero() {
        let hundred = U256::from(100u64);
        assert_eq!(net_gain(hundred, hundred, true), U256::ZERO);
        assert_eq!(net_gain(U256::from(90u64), hundred, true), U256::ZERO);
        assert_eq!(net_gain(U256::from(107u64), hundred, true), U256::from(7u64));
    }

    #[test]
    fn cross_token_reports_raw_gain() {
        assert_eq!(
            net_gain(U256::from(42u64), U256::from(100u64), false),
            U256::from(42u64)
        );
    }

    #[test]
    fn profit_saturates_into_signed_range() {
        let huge = Settlement {
            gross: U256::MAX,
            net: U256::MAX,
            residual_input: U256::ZERO,
        };
        assert_eq!(huge.profit(), I256::MAX);
        let small = Settlement {
            gross: U256::from(5u64),
            net: U256::from(5u64),
            residual_input: U256::ZERO,
        };
        assert_eq!(small.profit(), I256::from_raw(U256::from(5u64)));
        assert!(!small.profit().is_negative());
    }
}
