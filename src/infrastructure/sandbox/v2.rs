// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::infrastructure::chain::{CallContext, Contract, Host, Reverted};
use crate::infrastructure::data::abi::ERC20;
use crate::infrastructure::data::abi::UniV2Router::UniV2RouterCalls;
use crate::infrastructure::sandbox::{balance_of, pair_key};
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolInterface, SolValue};
use std::collections::HashMap;

/// Constant-product output with the fee taken from the input, fee in bps.
pub fn amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256, fee_bps: u32) -> U256 {
    scaled_amount_out(amount_in, reserve_in, reserve_out, fee_bps as u64, 10_000)
}

/// Same curve with an arbitrary fee denominator (V3 tiers use hundredths of a bip).
pub(crate) fn scaled_amount_out(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
    fee: u64,
    denominator: u64,
) -> U256 {
    if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() || fee >= denominator {
        return U256::ZERO;
    }
    let in_with_fee = amount_in.saturating_mul(U256::from(denominator - fee));
    let numerator = in_with_fee.saturating_mul(reserve_out);
    let denom = reserve_in
        .saturating_mul(U256::from(denominator))
        .saturating_add(in_with_fee);
    numerator / denom
}

/// Uniswap-V2-style router over pools whose reserves are simply the pool
/// account's token balances.
#[derive(Clone, Debug, Default)]
pub struct V2Router {
    fee_bps: u32,
    pools: HashMap<(Address, Address), Address>,
}

impl V2Router {
    pub fn new(fee_bps: u32) -> Self {
        Self {
            fee_bps,
            pools: HashMap::new(),
        }
    }

    pub fn with_pool(mut self, token_a: Address, token_b: Address, pool: Address) -> Self {
        self.pools.insert(pair_key(token_a, token_b), pool);
        self
    }

    fn pool(&self, token_a: Address, token_b: Address) -> Result<Address, Reverted> {
        self.pools
            .get(&pair_key(token_a, token_b))
            .copied()
            .ok_or_else(|| Reverted::reason("UniswapV2Library: PAIR_NOT_FOUND"))
    }

    fn amounts_out(&self, host: &dyn Host, amount_in: U256, path: &[Address]) -> Result<Vec<U256>, Reverted> {
        if path.len() < 2 {
            return Err(Reverted::reason("UniswapV2Library: INVALID_PATH"));
        }
        let mut amounts = Vec::with_capacity(path.len());
        amounts.push(amount_in);
        for pair in path.windows(2) {
            let pool = self.pool(pair[0], pair[1])?;
            let reserve_in = balance_of(host, pair[0], pool);
            let reserve_out = balance_of(host, pair[1], pool);
            if reserve_in.is_zero() || reserve_out.is_zero() {
                return Err(Reverted::reason("UniswapV2Library: INSUFFICIENT_LIQUIDITY"));
            }
            let last = amounts[amounts.len() - 1];
            amounts.push(amount_out(last, reserve_in, reserve_out, self.fee_bps));
        }
        Ok(amounts)
    }
}

impl Contract for V2Router {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        let call = UniV2RouterCalls::abi_decode(input).map_err(|_| Reverted::default())?;
        match call {
            UniV2RouterCalls::getAmountsOut(c) => {
                let amounts = self.amounts_out(host, c.amountIn, &c.path)?;
                Ok(Bytes::from((amounts,).abi_encode_params()))
            }
            UniV2RouterCalls::swapExactTokensForTokens(c) => {
                if U256::from(host.timestamp()) > c.deadline {
                    return Err(Reverted::reason("UniswapV2Router: EXPIRED"));
                }
                let amounts = self.amounts_out(host, c.amountIn, &c.path)?;
                let out = amounts[amounts.len() - 1];
                if out < c.amountOutMin {
                    return Err(Reverted::reason(
                        "UniswapV2Router: INSUFFICIENT_OUTPUT_AMOUNT",
                    ));
                }

                let first_pool = self.pool(c.path[0], c.path[1])?;
                let pull = ERC20::transferFromCall {
                    from: ctx.caller,
                    to: first_pool,
                    amount: c.amountIn,
                };
                host.call(ctx.address, c.path[0], &pull.abi_encode())?;

                for (i, pair) in c.path.windows(2).enumerate() {
                    let pool = self.pool(pair[0], pair[1])?;
                    let to = if i + 2 < c.path.len() {
                        self.pool(pair[1], c.path[i + 2])?
                    } else {
                        c.to
                    };
                    let push = ERC20::transferCall {
                        to,
                        amount: amounts[i + 1],
                    };
                    host.call(pool, pair[1], &push.abi_encode())?;
                }
                tracing::trace!(target: "sandbox", router = %ctx.address, amount_in = %c.amountIn, amount_out = %out, "v2 swap");
                Ok(Bytes::from((amounts,).abi_encode_params()))
            }
        }
    }
}
