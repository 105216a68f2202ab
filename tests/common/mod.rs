// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

#![allow(dead_code)]

use alloy::primitives::aliases::{U24, U160};
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolInterface, SolValue};
use oxidity_hops::chain::{CallContext, Contract, Host, MemoryChain, Reverted};
use oxidity_hops::data::abi::{ERC20, UniV2Router::UniV2RouterCalls};
use oxidity_hops::data::executor::Hop;
use oxidity_hops::domain::constants::{PROTOCOL_SOLIDLY, PROTOCOL_V2, PROTOCOL_V3};
use oxidity_hops::sandbox::{
    SandboxToken, SolidlyPairPool, SolidlyRouter, TokenStyle, V2Router, V3Pools, V3Quoter,
    V3Router, deal,
};
use oxidity_hops::services::executor::HopExecutor;
use std::sync::Arc;

pub const NOW: u64 = 1_700_000_000;

pub const WETH: Address = Address::repeat_byte(0x11);
pub const USDC: Address = Address::repeat_byte(0x22);
pub const DAI: Address = Address::repeat_byte(0x33);

pub const V2_ROUTER: Address = Address::repeat_byte(0xa2);
pub const V2_POOL_WETH_USDC: Address = Address::repeat_byte(0xb2);
pub const V2_POOL_USDC_DAI: Address = Address::repeat_byte(0xb3);
pub const V3_ROUTER: Address = Address::repeat_byte(0xa3);
pub const V3_QUOTER: Address = Address::repeat_byte(0xc3);
pub const V3_POOL_USDC_WETH: Address = Address::repeat_byte(0xd3);
pub const SOLIDLY_ROUTER: Address = Address::repeat_byte(0xa4);
pub const SOLIDLY_PAIR_DAI_WETH: Address = Address::repeat_byte(0xd4);
pub const PAR_ROUTER: Address = Address::repeat_byte(0xa5);

pub const EXECUTOR: Address = Address::repeat_byte(0xe0);
pub const OWNER: Address = Address::repeat_byte(0x0c);
pub const ALICE: Address = Address::repeat_byte(0xa1);
pub const STRANGER: Address = Address::repeat_byte(0x5e);

pub const V3_FEE: u32 = 500;

pub fn units(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

/// Tokens, one pool per venue family and a 1:1 router, with the executor deployed
/// at [`EXECUTOR`] and owned by [`OWNER`].
pub struct World {
    pub chain: Arc<MemoryChain>,
    pub executor: Arc<HopExecutor>,
}

impl World {
    pub fn new() -> Self {
        Self::with_styles(TokenStyle::Bool, TokenStyle::Bool, Address::ZERO)
    }

    pub fn with_styles(usdc: TokenStyle, dai: TokenStyle, permit2: Address) -> Self {
        let chain = Arc::new(MemoryChain::new(NOW));
        chain.deploy(WETH, Arc::new(SandboxToken::new("WETH", TokenStyle::Bool)));
        chain.deploy(USDC, Arc::new(SandboxToken::new("USDC", usdc)));
        chain.deploy(DAI, Arc::new(SandboxToken::new("DAI", dai)));

        chain.deploy(
            V2_ROUTER,
            Arc::new(
                V2Router::new(30)
                    .with_pool(WETH, USDC, V2_POOL_WETH_USDC)
                    .with_pool(USDC, DAI, V2_POOL_USDC_DAI),
            ),
        );
        deal(chain.as_ref(), WETH, V2_POOL_WETH_USDC, units(1_000));
        deal(chain.as_ref(), USDC, V2_POOL_WETH_USDC, units(2_000_000));
        deal(chain.as_ref(), USDC, V2_POOL_USDC_DAI, units(5_000_000));
        deal(chain.as_ref(), DAI, V2_POOL_USDC_DAI, units(5_000_000));

        let pools = Arc::new(V3Pools::new().with_pool(USDC, WETH, V3_FEE, V3_POOL_USDC_WETH));
        chain.deploy(V3_ROUTER, Arc::new(V3Router::new(pools.clone())));
        chain.deploy(V3_QUOTER, Arc::new(V3Quoter::new(pools)));
        deal(chain.as_ref(), USDC, V3_POOL_USDC_WETH, units(1_900_000));
        deal(chain.as_ref(), WETH, V3_POOL_USDC_WETH, units(1_000));

        let pair = Arc::new(SolidlyPairPool::new(DAI, WETH, false, 2));
        chain.deploy(SOLIDLY_PAIR_DAI_WETH, pair.clone());
        chain.deploy(
            SOLIDLY_ROUTER,
            Arc::new(SolidlyRouter::new().with_pair(SOLIDLY_PAIR_DAI_WETH, pair)),
        );
        deal(chain.as_ref(), DAI, SOLIDLY_PAIR_DAI_WETH, units(1_800_000));
        deal(chain.as_ref(), WETH, SOLIDLY_PAIR_DAI_WETH, units(1_000));

        chain.deploy(PAR_ROUTER, Arc::new(ParRouter));
        deal(chain.as_ref(), WETH, PAR_ROUTER, units(1_000));
        deal(chain.as_ref(), USDC, PAR_ROUTER, units(1_000));

        let executor = Arc::new(HopExecutor::deploy(chain.as_ref(), EXECUTOR, OWNER, permit2));
        chain.deploy(EXECUTOR, executor.clone());
        Self { chain, executor }
    }

    pub fn host(&self) -> &dyn Host {
        self.chain.as_ref()
    }

    pub fn balance(&self, token: Address, owner: Address) -> U256 {
        self.chain.balance_of(token, owner)
    }
}

pub fn hop(protocol: u8, router: Address, token_in: Address, token_out: Address) -> Hop {
    Hop {
        protocol,
        router,
        pool: Address::ZERO,
        quoter: Address::ZERO,
        tokenIn: token_in,
        tokenOut: token_out,
        amountIn: U256::ZERO,
        fee: U24::ZERO,
        stable: false,
        minOut: U256::ZERO,
        deadline: U256::from(NOW + 60),
        sqrtPriceLimitX96: U160::ZERO,
    }
}

pub fn v2_hop(token_in: Address, token_out: Address) -> Hop {
    hop(PROTOCOL_V2, V2_ROUTER, token_in, token_out)
}

pub fn v3_hop(token_in: Address, token_out: Address) -> Hop {
    Hop {
        quoter: V3_QUOTER,
        fee: U24::from(V3_FEE),
        ..hop(PROTOCOL_V3, V3_ROUTER, token_in, token_out)
    }
}

pub fn solidly_hop(token_in: Address, token_out: Address) -> Hop {
    Hop {
        pool: SOLIDLY_PAIR_DAI_WETH,
        ..hop(PROTOCOL_SOLIDLY, SOLIDLY_ROUTER, token_in, token_out)
    }
}

/// Hop through [`ParRouter`]: out equals in.
pub fn par_hop(token_in: Address, token_out: Address) -> Hop {
    hop(PROTOCOL_V2, PAR_ROUTER, token_in, token_out)
}

/// V2-shaped router that swaps at exactly 1:1 out of its own inventory.
pub struct ParRouter;

impl Contract for ParRouter {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        match UniV2RouterCalls::abi_decode(input).map_err(|_| Reverted::default())? {
            UniV2RouterCalls::getAmountsOut(c) => {
                Ok(Bytes::from((vec![c.amountIn, c.amountIn],).abi_encode_params()))
            }
            UniV2RouterCalls::swapExactTokensForTokens(c) => {
                let (token_in, token_out) = (c.path[0], c.path[c.path.len() - 1]);
                let pull = ERC20::transferFromCall {
                    from: ctx.caller,
                    to: ctx.address,
                    amount: c.amountIn,
                };
                host.call(ctx.address, token_in, &pull.abi_encode())?;
                let push = ERC20::transferCall {
                    to: c.to,
                    amount: c.amountIn,
                };
                host.call(ctx.address, token_out, &push.abi_encode())?;
                Ok(Bytes::from((vec![c.amountIn, c.amountIn],).abi_encode_params()))
            }
        }
    }
}

/// Number of `Approval` logs on `token` setting `spender`'s allowance to MAX.
pub fn max_approvals(chain: &MemoryChain, token: Address, spender: Address) -> usize {
    use alloy_sol_types::SolEvent;
    chain
        .logs_for(token)
        .iter()
        .filter_map(|log| ERC20::Approval::decode_log_data(&log.data).ok())
        .filter(|ev| ev.spender == spender && ev.value == U256::MAX)
        .count()
}
