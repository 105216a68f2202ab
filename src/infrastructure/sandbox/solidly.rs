// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::infrastructure::chain::{CallContext, Contract, Host, Reverted};
use crate::infrastructure::data::abi::ERC20;
use crate::infrastructure::data::abi::SolidlyPair::SolidlyPairCalls;
use crate::infrastructure::data::abi::SolidlyRouter::SolidlyRouterCalls;
use crate::infrastructure::sandbox::v2::amount_out;
use crate::infrastructure::sandbox::{balance_of, pair_key};
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolInterface, SolValue};
use std::collections::HashMap;
use std::sync::Arc;

/// Solidly pair. Volatile pairs price as constant product, stable pairs as a
/// constant sum capped by the output reserve.
#[derive(Clone, Debug)]
pub struct SolidlyPairPool {
    pub token0: Address,
    pub token1: Address,
    pub stable: bool,
    pub fee_bps: u32,
}

impl SolidlyPairPool {
    pub fn new(token_a: Address, token_b: Address, stable: bool, fee_bps: u32) -> Self {
        let (token0, token1) = pair_key(token_a, token_b);
        Self {
            token0,
            token1,
            stable,
            fee_bps,
        }
    }

    fn counterpart(&self, token_in: Address) -> Result<Address, Reverted> {
        if token_in == self.token0 {
            Ok(self.token1)
        } else if token_in == self.token1 {
            Ok(self.token0)
        } else {
            Err(Reverted::reason("Pair: INVALID_TOKEN"))
        }
    }

    pub fn get_amount_out(
        &self,
        host: &dyn Host,
        pair: Address,
        amount_in: U256,
        token_in: Address,
    ) -> Result<U256, Reverted> {
        let token_out = self.counterpart(token_in)?;
        let reserve_in = balance_of(host, token_in, pair);
        let reserve_out = balance_of(host, token_out, pair);
        if !self.stable {
            return Ok(amount_out(amount_in, reserve_in, reserve_out, self.fee_bps));
        }
        let after_fee = amount_in.saturating_mul(U256::from(10_000 - self.fee_bps.min(10_000)))
            / U256::from(10_000u64);
        Ok(after_fee.min(reserve_out))
    }
}

impl Contract for SolidlyPairPool {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        let SolidlyPairCalls::getAmountOut(call) =
            SolidlyPairCalls::abi_decode(input).map_err(|_| Reverted::default())?;
        let out = self.get_amount_out(host, ctx.address, call.amountIn, call.tokenIn)?;
        Ok(Bytes::from(out.abi_encode()))
    }
}

/// Router over deployed [`SolidlyPairPool`]s keyed by token pair and stability.
#[derive(Clone, Debug, Default)]
pub struct SolidlyRouter {
    pairs: HashMap<(Address, Address, bool), (Address, Arc<SolidlyPairPool>)>,
}

impl SolidlyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(mut self, address: Address, pair: Arc<SolidlyPairPool>) -> Self {
        self.pairs
            .insert((pair.token0, pair.token1, pair.stable), (address, pair));
        self
    }
}

impl Contract for SolidlyRouter {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        let SolidlyRouterCalls::swapExactTokensForTokensSimple(c) =
            SolidlyRouterCalls::abi_decode(input).map_err(|_| Reverted::default())?;
        if U256::from(host.timestamp()) > c.deadline {
            return Err(Reverted::reason("Router: EXPIRED"));
        }
        let (a, b) = pair_key(c.tokenFrom, c.tokenTo);
        let (address, pair) = self
            .pairs
            .get(&(a, b, c.stable))
            .ok_or_else(|| Reverted::reason("Router: PAIR_NOT_FOUND"))?;
        let out = pair.get_amount_out(host, *address, c.amountIn, c.tokenFrom)?;
        if out < c.amountOutMin {
            return Err(Reverted::reason("Router: INSUFFICIENT_OUTPUT_AMOUNT"));
        }

        let pull = ERC20::transferFromCall {
            from: ctx.caller,
            to: *address,
            amount: c.amountIn,
        };
        host.call(ctx.address, c.tokenFrom, &pull.abi_encode())?;
        let push = ERC20::transferCall { to: c.to, amount: out };
        host.call(*address, c.tokenTo, &push.abi_encode())?;
        tracing::trace!(target: "sandbox", router = %ctx.address, stable = c.stable, amount_in = %c.amountIn, amount_out = %out, "solidly swap");
        Ok(Bytes::from((vec![c.amountIn, out],).abi_encode_params()))
    }
}
