// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Route files: a JSON (or embedded TOML) description of a hop sequence, turned
//! into executor calldata.
//!
//! ```json
//! {
//!   "input_token": "0x…", "amount_in": "1000000000000000000",
//!   "min_profit": "0", "pull_from_sender": true, "slippage_bps": 50,
//!   "legs": [
//!     { "protocol": "v2", "router": "0x…", "token_in": "0x…", "token_out": "0x…" },
//!     { "protocol": "v3", "router": "0x…", "quoter": "0x…", "fee": 500, … },
//!     { "protocol": "solidly", "router": "0x…", "pool": "0x…", "stable": true, … }
//!   ]
//! }
//! ```

use crate::common::constants::BPS_DENOMINATOR;
use crate::common::parsing::{parse_hex_bytes, parse_u256};
use crate::common::time_utils::deadline_after;
use crate::domain::constants::{PROTOCOL_SOLIDLY, PROTOCOL_V2, PROTOCOL_V3};
use crate::domain::error::AppError;
use crate::infrastructure::data::executor::{
    Hop, HopExecutor, Permit2Data, PermitTransferFrom, SignatureTransferDetails, TokenPermissions,
};
use crate::services::executor::ExecuteRequest;
use alloy::primitives::aliases::{U24, U160};
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use serde::Deserialize;
use std::path::Path;

/// Decimal or `0x` hex amount; bare JSON/TOML integers are accepted too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AmountRepr")]
pub struct Amount(pub U256);

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Int(u64),
    Text(String),
}

impl TryFrom<AmountRepr> for Amount {
    type Error = String;

    fn try_from(repr: AmountRepr) -> Result<Self, Self::Error> {
        match repr {
            AmountRepr::Int(v) => Ok(Amount(U256::from(v))),
            AmountRepr::Text(s) => parse_u256(&s)
                .map(Amount)
                .ok_or_else(|| format!("invalid amount `{s}`")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    V2,
    V3,
    Solidly,
}

impl Venue {
    pub fn tag(self) -> u8 {
        match self {
            Venue::V2 => PROTOCOL_V2,
            Venue::V3 => PROTOCOL_V3,
            Venue::Solidly => PROTOCOL_SOLIDLY,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LegSpec {
    pub protocol: Venue,
    pub router: Address,
    #[serde(default)]
    pub pool: Option<Address>,
    #[serde(default)]
    pub quoter: Option<Address>,
    pub token_in: Address,
    pub token_out: Address,
    /// Omitted or zero spends the executor's live balance of `token_in`.
    #[serde(default)]
    pub amount_in: Option<Amount>,
    #[serde(default)]
    pub fee: u32,
    #[serde(default)]
    pub stable: bool,
    #[serde(default)]
    pub min_out: Option<Amount>,
    /// Absolute unix deadline; defaults to now plus the configured window.
    #[serde(default)]
    pub deadline: Option<u64>,
    #[serde(default)]
    pub sqrt_price_limit_x96: Option<Amount>,
}

impl LegSpec {
    fn to_hop(&self, default_deadline: u64) -> Result<Hop, AppError> {
        if self.fee >= 1 << 24 {
            return Err(AppError::Route(format!("fee tier {} does not fit uint24", self.fee)));
        }
        let limit = self.sqrt_price_limit_x96.unwrap_or_default().0;
        if limit.bit_len() > 160 {
            return Err(AppError::Route("sqrt_price_limit_x96 does not fit uint160".into()));
        }
        Ok(Hop {
            protocol: self.protocol.tag(),
            router: self.router,
            pool: self.pool.unwrap_or_default(),
            quoter: self.quoter.unwrap_or_default(),
            tokenIn: self.token_in,
            tokenOut: self.token_out,
            amountIn: self.amount_in.unwrap_or_default().0,
            fee: U24::from(self.fee),
            stable: self.stable,
            minOut: self.min_out.unwrap_or_default().0,
            deadline: U256::from(self.deadline.unwrap_or(default_deadline)),
            sqrtPriceLimitX96: U160::from(limit),
        })
    }
}

/// Pre-signed Permit2 bundle carried in a route file.
#[derive(Clone, Debug, Deserialize)]
pub struct PermitSpec {
    #[serde(default)]
    pub permit2: Option<Address>,
    pub token: Address,
    pub amount: Amount,
    pub nonce: Amount,
    pub deadline: u64,
    #[serde(default)]
    pub requested_amount: Option<Amount>,
    pub signature: String,
}

impl PermitSpec {
    pub fn to_permit_data(&self) -> Result<Permit2Data, AppError> {
        let signature = parse_hex_bytes(&self.signature).ok_or_else(|| AppError::Validation {
            field: "permit.signature".into(),
            message: "not valid hex".into(),
        })?;
        Ok(Permit2Data {
            permit2: self.permit2.unwrap_or_default(),
            permit: PermitTransferFrom {
                permitted: TokenPermissions {
                    token: self.token,
                    amount: self.amount.0,
                },
                nonce: self.nonce.0,
                deadline: U256::from(self.deadline),
            },
            transferDetails: SignatureTransferDetails {
                to: Address::ZERO,
                requestedAmount: self.requested_amount.unwrap_or_default().0,
            },
            signature,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RouteFile {
    pub input_token: Address,
    pub amount_in: Amount,
    #[serde(default)]
    pub min_profit: Amount,
    /// Defaults to the caller.
    #[serde(default)]
    pub recipient: Option<Address>,
    #[serde(default)]
    pub pull_from_sender: bool,
    /// Overrides the configured slippage for the final `min_out`.
    #[serde(default)]
    pub slippage_bps: Option<u32>,
    #[serde(default)]
    pub permit: Option<PermitSpec>,
    pub legs: Vec<LegSpec>,
}

impl RouteFile {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::Route(format!("invalid route json: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Route(format!("read {}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn hops(&self, now: u64, deadline_secs: u64) -> Result<Vec<Hop>, AppError> {
        if self.legs.is_empty() {
            return Err(AppError::Route("route has no legs".into()));
        }
        let default_deadline = deadline_after(now, deadline_secs);
        self.legs.iter().map(|leg| leg.to_hop(default_deadline)).collect()
    }

    pub fn to_request(&self, caller: Address, now: u64, deadline_secs: u64) -> Result<ExecuteRequest, AppError> {
        let hops = self.hops(now, deadline_secs)?;
        let recipient = self.recipient.unwrap_or(caller);
        let mut request = ExecuteRequest::new(hops, self.input_token, self.amount_in.0, recipient)
            .with_min_profit(self.min_profit.0);
        if self.pull_from_sender {
            let permit = match &self.permit {
                Some(signed) => signed.to_permit_data()?,
                None => Permit2Data::none(),
            };
            request = request.pulling(permit);
        }
        Ok(request)
    }

    pub fn effective_slippage(&self, configured_bps: u32) -> Result<u32, AppError> {
        let bps = self.slippage_bps.unwrap_or(configured_bps);
        if u64::from(bps) > BPS_DENOMINATOR {
            return Err(AppError::Validation {
                field: "slippage_bps".into(),
                message: format!("{bps} exceeds {BPS_DENOMINATOR}"),
            });
        }
        Ok(bps)
    }
}

/// `quoted_out` less `slippage_bps`, rounded down.
pub fn min_out_bps(quoted_out: U256, slippage_bps: u32) -> U256 {
    let denom = U256::from(BPS_DENOMINATOR);
    let keep = denom.saturating_sub(U256::from(slippage_bps));
    quoted_out.saturating_mul(keep) / denom
}

/// Tighten the final hop's `minOut` to the simulated output less slippage, unless
/// the route already pinned one.
pub fn apply_slippage(request: &mut ExecuteRequest, expected_out: U256, slippage_bps: u32) {
    if let Some(last) = request.hops.last_mut() {
        if last.minOut.is_zero() {
            last.minOut = min_out_bps(expected_out, slippage_bps);
        }
    }
}

pub fn encode_execute_calldata(request: &ExecuteRequest) -> Bytes {
    Bytes::from(request.clone().into_call().abi_encode())
}

pub fn encode_simulate_calldata(hops: &[Hop], input_token: Address, amount_in: U256) -> Bytes {
    HopExecutor::simulateCall {
        hops: hops.to_vec(),
        inputToken: input_token,
        amountIn: amount_in,
    }
    .abi_encode()
    .into()
}
