// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! In-process stand-ins for the executor's collaborators: ERC-20 tokens with the
//! common return conventions, the three venue families and Permit2.

pub mod permit2;
pub mod scenario;
pub mod solidly;
pub mod token;
pub mod v2;
pub mod v3;

pub use permit2::{SandboxPermit2, sign_permit};
pub use scenario::{Scenario, SandboxRun};
pub use solidly::{SolidlyPairPool, SolidlyRouter};
pub use token::{SandboxToken, TokenStyle, deal, set_allowance};
pub use v2::V2Router;
pub use v3::{V3Pools, V3Quoter, V3Router};

use crate::infrastructure::chain::Host;
use crate::infrastructure::data::abi::ERC20;
use alloy::primitives::{Address, U256};
use alloy_sol_types::SolCall;

/// Token balance read through the token's code; zero when the query fails.
pub(crate) fn balance_of(host: &dyn Host, token: Address, owner: Address) -> U256 {
    let input = ERC20::balanceOfCall(owner).abi_encode();
    host.static_call(owner, token, &input)
        .ok()
        .and_then(|out| ERC20::balanceOfCall::abi_decode_returns(&out).ok())
        .unwrap_or_default()
}

/// Order-independent pool key.
pub(crate) fn pair_key(a: Address, b: Address) -> (Address, Address) {
    if a < b { (a, b) } else { (b, a) }
}
