// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::constants::{PROTOCOL_SOLIDLY, PROTOCOL_V2, PROTOCOL_V3};
use crate::domain::error::ExecutorError;
use crate::infrastructure::data::abi::{SolidlyPair, SolidlyRouter, UniV2Router, UniV3Quoter, UniV3Router};
use crate::infrastructure::data::executor::Hop;
use crate::services::executor::allowance::approve_if_needed;
use crate::services::executor::custody::Custody;
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;

/// Closed set of venue families a hop can route through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adapter {
    ConstantProduct,
    ConcentratedLiquidity,
    StablePair,
}

impl Adapter {
    pub fn from_tag(tag: u8) -> Result<Self, ExecutorError> {
        match tag {
            PROTOCOL_V2 => Ok(Self::ConstantProduct),
            PROTOCOL_V3 => Ok(Self::ConcentratedLiquidity),
            PROTOCOL_SOLIDLY => Ok(Self::StablePair),
            other => Err(ExecutorError::BadProtocol { protocol: other }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ConstantProduct => "v2",
            Self::ConcentratedLiquidity => "v3",
            Self::StablePair => "solidly",
        }
    }

    /// Swap `amount_in` of `hop.tokenIn` through `hop.router`, output landing in
    /// custody. The router's allowance is topped up right before the call.
    pub fn swap(self, custody: &Custody<'_>, hop: &Hop, amount_in: U256) -> Result<(), ExecutorError> {
        approve_if_needed(custody, hop.tokenIn, hop.router, amount_in)?;

        let me = custody.address();
        let input = match self {
            Self::ConstantProduct => UniV2Router::swapExactTokensForTokensCall {
                amountIn: amount_in,
                amountOutMin: hop.minOut,
                path: vec![hop.tokenIn, hop.tokenOut],
                to: me,
                deadline: hop.deadline,
            }
            .abi_encode(),
            Self::ConcentratedLiquidity => UniV3Router::exactInputSingleCall {
                params: UniV3Router::ExactInputSingleParams {
                    tokenIn: hop.tokenIn,
                    tokenOut: hop.tokenOut,
                    fee: hop.fee,
                    recipient: me,
                    deadline: hop.deadline,
                    amountIn: amount_in,
                    amountOutMinimum: hop.minOut,
                    sqrtPriceLimitX96: hop.sqrtPriceLimitX96,
                },
            }
            .abi_encode(),
            Self::StablePair => SolidlyRouter::swapExactTokensForTokensSimpleCall {
                amountIn: amount_in,
                amountOutMin: hop.minOut,
                tokenFrom: hop.tokenIn,
                tokenTo: hop.tokenOut,
                stable: hop.stable,
                to: me,
                deadline: hop.deadline,
            }
            .abi_encode(),
        };
        custody.call(hop.router, &input)?;
        Ok(())
    }

    /// Quote-only counterpart of [`Adapter::swap`]. V2 asks the router, V3 the
    /// hop's quoter, Solidly the pair itself.
    pub fn quote(self, custody: &Custody<'_>, hop: &Hop, amount_in: U256) -> Result<U256, ExecutorError> {
        match self {
            Self::ConstantProduct => {
                let call = UniV2Router::getAmountsOutCall {
                    amountIn: amount_in,
                    path: vec![hop.tokenIn, hop.tokenOut],
                };
                let out = custody.static_call(hop.router, &call.abi_encode())?;
                let amounts = decode_or_revert(hop.router, &out, |data| {
                    UniV2Router::getAmountsOutCall::abi_decode_returns(data).ok()
                })?;
                amounts.last().copied().ok_or(ExecutorError::CallReverted {
                    target: hop.router,
                    data: Bytes::new(),
                })
            }
            Self::ConcentratedLiquidity => {
                let call = UniV3Quoter::quoteExactInputSingleCall {
                    tokenIn: hop.tokenIn,
                    tokenOut: hop.tokenOut,
                    fee: hop.fee,
                    amountIn: amount_in,
                    sqrtPriceLimitX96: hop.sqrtPriceLimitX96,
                };
                let out = custody.static_call(hop.quoter, &call.abi_encode())?;
                decode_or_revert(hop.quoter, &out, |data| {
                    UniV3Quoter::quoteExactInputSingleCall::abi_decode_returns(data).ok()
                })
            }
            Self::StablePair => {
                let call = SolidlyPair::getAmountOutCall {
                    amountIn: amount_in,
                    tokenIn: hop.tokenIn,
                };
                let out = custody.static_call(hop.pool, &call.abi_encode())?;
                decode_or_revert(hop.pool, &out, |data| {
                    SolidlyPair::getAmountOutCall::abi_decode_returns(data).ok()
                })
            }
        }
    }
}

/// Undecodable return data fails the same way a bare `revert()` would.
fn decode_or_revert<T>(
    target: Address,
    out: &[u8],
    decode: impl FnOnce(&[u8]) -> Option<T>,
) -> Result<T, ExecutorError> {
    decode(out).ok_or(ExecutorError::CallReverted {
        target,
        data: Bytes::new(),
    })
}
