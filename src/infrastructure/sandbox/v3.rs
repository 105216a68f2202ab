// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::infrastructure::chain::{CallContext, Contract, Host, Reverted};
use crate::infrastructure::data::abi::ERC20;
use crate::infrastructure::data::abi::UniV3Quoter::UniV3QuoterCalls;
use crate::infrastructure::data::abi::UniV3Router::UniV3RouterCalls;
use crate::infrastructure::sandbox::v2::scaled_amount_out;
use crate::infrastructure::sandbox::{balance_of, pair_key};
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolInterface, SolValue};
use std::collections::HashMap;
use std::sync::Arc;

const FEE_DENOMINATOR: u64 = 1_000_000;

/// Pool registry shared by the V3 router and its quoter. Pools are priced as
/// constant product over their token balances; fee tiers are in hundredths of a
/// bip (500 = 0.05%). The price limit argument is accepted and ignored.
#[derive(Clone, Debug, Default)]
pub struct V3Pools {
    pools: HashMap<(Address, Address, u32), Address>,
}

impl V3Pools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, token_a: Address, token_b: Address, fee: u32, pool: Address) -> Self {
        let (a, b) = pair_key(token_a, token_b);
        self.pools.insert((a, b, fee), pool);
        self
    }

    fn pool(&self, token_a: Address, token_b: Address, fee: u32) -> Result<Address, Reverted> {
        let (a, b) = pair_key(token_a, token_b);
        self.pools
            .get(&(a, b, fee))
            .copied()
            .ok_or_else(|| Reverted::reason("pool not initialized"))
    }

    fn quote(
        &self,
        host: &dyn Host,
        token_in: Address,
        token_out: Address,
        fee: u32,
        amount_in: U256,
    ) -> Result<(Address, U256), Reverted> {
        let pool = self.pool(token_in, token_out, fee)?;
        let reserve_in = balance_of(host, token_in, pool);
        let reserve_out = balance_of(host, token_out, pool);
        let out = scaled_amount_out(amount_in, reserve_in, reserve_out, fee as u64, FEE_DENOMINATOR);
        if out.is_zero() {
            return Err(Reverted::reason("SPL"));
        }
        Ok((pool, out))
    }
}

#[derive(Clone, Debug)]
pub struct V3Router {
    pools: Arc<V3Pools>,
}

impl V3Router {
    pub fn new(pools: Arc<V3Pools>) -> Self {
        Self { pools }
    }
}

impl Contract for V3Router {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        let UniV3RouterCalls::exactInputSingle(call) =
            UniV3RouterCalls::abi_decode(input).map_err(|_| Reverted::default())?;
        let p = call.params;
        if U256::from(host.timestamp()) > p.deadline {
            return Err(Reverted::reason("Transaction too old"));
        }
        let fee = p.fee.to::<u32>();
        let (pool, out) = self.pools.quote(host, p.tokenIn, p.tokenOut, fee, p.amountIn)?;
        if out < p.amountOutMinimum {
            return Err(Reverted::reason("Too little received"));
        }

        let pull = ERC20::transferFromCall {
            from: ctx.caller,
            to: pool,
            amount: p.amountIn,
        };
        host.call(ctx.address, p.tokenIn, &pull.abi_encode())?;
        let push = ERC20::transferCall {
            to: p.recipient,
            amount: out,
        };
        host.call(pool, p.tokenOut, &push.abi_encode())?;
        tracing::trace!(target: "sandbox", router = %ctx.address, fee, amount_in = %p.amountIn, amount_out = %out, "v3 swap");
        Ok(Bytes::from(out.abi_encode()))
    }
}

/// Quoter over the same pools as its router.
#[derive(Clone, Debug)]
pub struct V3Quoter {
    pools: Arc<V3Pools>,
}

impl V3Quoter {
    pub fn new(pools: Arc<V3Pools>) -> Self {
        Self { pools }
    }
}

impl Contract for V3Quoter {
    fn call(&self, host: &dyn Host, _ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        let UniV3QuoterCalls::quoteExactInputSingle(call) =
            UniV3QuoterCalls::abi_decode(input).map_err(|_| Reverted::default())?;
        let (_, out) = self.pools.quote(
            host,
            call.tokenIn,
            call.tokenOut,
            call.fee.to::<u32>(),
            call.amountIn,
        )?;
        Ok(Bytes::from(out.abi_encode()))
    }
}
