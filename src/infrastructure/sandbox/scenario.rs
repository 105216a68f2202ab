// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! TOML scenario: tokens, venues with seeded reserves, balances and a route,
//! assembled into a ready [`MemoryChain`] with a deployed executor.

use crate::domain::constants::DEFAULT_DEADLINE_SECS;
use crate::domain::error::AppError;
use crate::infrastructure::chain::MemoryChain;
use crate::infrastructure::sandbox::{
    SandboxPermit2, SandboxToken, SolidlyPairPool, SolidlyRouter, TokenStyle, V2Router, V3Pools,
    V3Quoter, V3Router, deal, set_allowance,
};
use crate::services::executor::{ExecuteRequest, HopExecutor};
use crate::services::route::{Amount, RouteFile};
use alloy::primitives::Address;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

fn default_timestamp() -> u64 {
    1_700_000_000
}

fn default_chain_id() -> u64 {
    1
}

fn default_v2_fee_bps() -> u32 {
    30
}

fn default_solidly_fee_bps() -> u32 {
    2
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExecutorSpec {
    pub address: Address,
    pub owner: Address,
    /// Default Permit2 service; a sandbox Permit2 is deployed here when set.
    #[serde(default)]
    pub permit2: Option<Address>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TokenSpec {
    pub address: Address,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub style: TokenStyle,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PoolSpec {
    pub pool: Address,
    pub token_a: Address,
    pub token_b: Address,
    pub reserve_a: Amount,
    pub reserve_b: Amount,
    /// V3 fee tier in hundredths of a bip.
    #[serde(default)]
    pub fee: u32,
    #[serde(default)]
    pub stable: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct V2Spec {
    pub router: Address,
    #[serde(default = "default_v2_fee_bps")]
    pub fee_bps: u32,
    #[serde(default)]
    pub pools: Vec<PoolSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct V3Spec {
    pub router: Address,
    pub quoter: Address,
    #[serde(default)]
    pub pools: Vec<PoolSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SolidlySpec {
    pub router: Address,
    #[serde(default = "default_solidly_fee_bps")]
    pub fee_bps: u32,
    #[serde(default)]
    pub pairs: Vec<PoolSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BalanceSpec {
    pub token: Address,
    pub owner: Address,
    pub amount: Amount,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AllowanceSpec {
    pub token: Address,
    pub owner: Address,
    pub spender: Address,
    pub amount: Amount,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_timestamp")]
    pub timestamp: u64,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Caller of `execute`; defaults to the executor owner.
    #[serde(default)]
    pub caller: Option<Address>,
    pub executor: ExecutorSpec,
    #[serde(default)]
    pub tokens: Vec<TokenSpec>,
    #[serde(default)]
    pub v2: Vec<V2Spec>,
    #[serde(default)]
    pub v3: Vec<V3Spec>,
    #[serde(default)]
    pub solidly: Vec<SolidlySpec>,
    #[serde(default)]
    pub balances: Vec<BalanceSpec>,
    #[serde(default)]
    pub allowances: Vec<AllowanceSpec>,
    pub route: RouteFile,
}

/// A built scenario: chain, executor and the request its route describes.
pub struct SandboxRun {
    pub chain: Arc<MemoryChain>,
    pub executor: Arc<HopExecutor>,
    pub caller: Address,
    pub request: ExecuteRequest,
}

impl Scenario {
    pub fn from_toml(raw: &str) -> Result<Self, AppError> {
        toml::from_str(raw).map_err(|e| AppError::Config(format!("invalid scenario: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml(&raw)
    }

    pub fn build(&self) -> Result<SandboxRun, AppError> {
        let chain = Arc::new(MemoryChain::new(self.timestamp));

        for token in &self.tokens {
            chain.deploy(
                token.address,
                Arc::new(SandboxToken::new(token.symbol.clone(), token.style)),
            );
        }

        for venue in &self.v2 {
            let mut router = V2Router::new(venue.fee_bps);
            for pool in &venue.pools {
                router = router.with_pool(pool.token_a, pool.token_b, pool.pool);
                seed_reserves(&chain, pool);
            }
            chain.deploy(venue.router, Arc::new(router));
        }

        for venue in &self.v3 {
            let mut pools = V3Pools::new();
            for pool in &venue.pools {
                pools = pools.with_pool(pool.token_a, pool.token_b, pool.fee, pool.pool);
                seed_reserves(&chain, pool);
            }
            let pools = Arc::new(pools);
            chain.deploy(venue.router, Arc::new(V3Router::new(pools.clone())));
            chain.deploy(venue.quoter, Arc::new(V3Quoter::new(pools)));
        }

        for venue in &self.solidly {
            let mut router = SolidlyRouter::new();
            for pool in &venue.pairs {
                let pair = Arc::new(SolidlyPairPool::new(
                    pool.token_a,
                    pool.token_b,
                    pool.stable,
                    venue.fee_bps,
                ));
                chain.deploy(pool.pool, pair.clone());
                router = router.with_pair(pool.pool, pair);
                seed_reserves(&chain, pool);
            }
            chain.deploy(venue.router, Arc::new(router));
        }

        let permit2 = self.executor.permit2.unwrap_or_default();
        if !permit2.is_zero() {
            chain.deploy(permit2, Arc::new(SandboxPermit2::new(self.chain_id)));
        }

        for balance in &self.balances {
            deal(chain.as_ref(), balance.token, balance.owner, balance.amount.0);
        }
        for allowance in &self.allowances {
            set_allowance(
                chain.as_ref(),
                allowance.token,
                allowance.owner,
                allowance.spender,
                allowance.amount.0,
            );
        }

        let executor = Arc::new(HopExecutor::deploy(
            chain.as_ref(),
            self.executor.address,
            self.executor.owner,
            permit2,
        ));
        chain.deploy(self.executor.address, executor.clone());

        let caller = self.caller.unwrap_or(self.executor.owner);
        let request = self
            .route
            .to_request(caller, self.timestamp, DEFAULT_DEADLINE_SECS)?;
        for (index, hop) in request.hops.iter().enumerate() {
            if !chain.has_code(hop.router) {
                tracing::warn!(target: "sandbox", hop = index, router = %hop.router, "route leg targets an address with no contract");
            }
        }

        tracing::info!(
            target: "sandbox",
            tokens = self.tokens.len(),
            v2 = self.v2.len(),
            v3 = self.v3.len(),
            solidly = self.solidly.len(),
            hops = request.hops.len(),
            "scenario built"
        );
        Ok(SandboxRun {
            chain,
            executor,
            caller,
            request,
        })
    }
}

fn seed_reserves(chain: &MemoryChain, pool: &PoolSpec) {
    deal(chain, pool.token_a, pool.pool, pool.reserve_a.0);
    deal(chain, pool.token_b, pool.pool, pool.reserve_b.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    pub(crate) const SCENARIO: &str = r#"
timestamp = 1000

[executor]
address = "0xe000000000000000000000000000000000000001"
owner = "0xca11000000000000000000000000000000000001"

[[tokens]]
address = "0x1000000000000000000000000000000000000001"
symbol = "WETH"

[[tokens]]
address = "0x2000000000000000000000000000000000000002"
symbol = "USDC"
style = "silent"

[[v2]]
router = "0xa200000000000000000000000000000000000002"
fee_bps = 30
pools = [
  { pool = "0xb200000000000000000000000000000000000002", token_a = "0x1000000000000000000000000000000000000001", token_b = "0x2000000000000000000000000000000000000002", reserve_a = "1_000_000", reserve_b = "2_000_000" },
]

[[balances]]
token = "0x1000000000000000000000000000000000000001"
owner = "0xe000000000000000000000000000000000000001"
amount = 1000

[route]
input_token = "0x1000000000000000000000000000000000000001"
amount_in = "0"

[[route.legs]]
protocol = "v2"
router = "0xa200000000000000000000000000000000000002"
token_in = "0x1000000000000000000000000000000000000001"
token_out = "0x2000000000000000000000000000000000000002"
"#;

    #[test]
    fn scenario_builds_chain_and_request() {
        let scenario = Scenario::from_toml(SCENARIO).expect("parse");
        let run = scenario.build().expect("build");

        let weth: Address = "0x1000000000000000000000000000000000000001".parse().expect("addr");
        let pool: Address = "0xb200000000000000000000000000000000000002".parse().expect("addr");
        assert_eq!(run.chain.balance_of(weth, pool), U256::from(1_000_000u64));
        assert_eq!(
            run.chain.balance_of(weth, run.executor.address()),
            U256::from(1000u64)
        );
        assert_eq!(run.caller, scenario.executor.owner);
        assert_eq!(run.executor.owner(run.chain.as_ref()), scenario.executor.owner);
        assert_eq!(run.request.hops.len(), 1);
        assert_eq!(run.request.hops[0].deadline, U256::from(1000 + DEFAULT_DEADLINE_SECS));
    }

    #[test]
    fn scenario_route_executes_on_sandbox() {
        let scenario = Scenario::from_toml(SCENARIO).expect("parse");
        let run = scenario.build().expect("build");
        let expected = run
            .executor
            .simulate(
                run.chain.as_ref(),
                &run.request.hops,
                run.request.input_token,
                U256::from(1000u64),
            )
            .expect("simulate");
        let profit = run
            .executor
            .execute(run.chain.as_ref(), run.caller, &run.request)
            .expect("execute");
        assert_eq!(profit.into_raw(), expected);

        let usdc: Address = "0x2000000000000000000000000000000000000002".parse().expect("addr");
        assert_eq!(run.chain.balance_of(usdc, run.caller), expected);
    }
}
