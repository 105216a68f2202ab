// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use alloy::primitives::{Address, B256, Bytes, Log, U256};
use std::fmt;

/// Raw revert payload of a failed call frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reverted {
    pub data: Bytes,
}

impl Reverted {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Solidity `Error(string)` revert, as emitted by `require(cond, "reason")`.
    pub fn reason(reason: &str) -> Self {
        use alloy_sol_types::SolError;
        Self::new(alloy_sol_types::Revert::from(reason).abi_encode())
    }
}

impl fmt::Display for Reverted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reverted: 0x{}", hex::encode(&self.data))
    }
}

impl std::error::Error for Reverted {}

/// Journal position returned by [`Host::checkpoint`]. Must be committed or reverted
/// in LIFO order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(pub usize);

/// Caller/callee pair of one call frame (`msg.sender` and `address(this)`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Address,
    pub address: Address,
}

/// Execution environment the executor runs in. Every external interaction
/// (token, router, quoter, Permit2) is an ABI-encoded call through here.
pub trait Host: Send + Sync {
    /// State-mutating call. A reverting callee leaves no state behind.
    fn call(&self, caller: Address, target: Address, input: &[u8]) -> Result<Bytes, Reverted>;

    /// Call whose state changes are always discarded, success or not.
    fn static_call(&self, caller: Address, target: Address, input: &[u8])
    -> Result<Bytes, Reverted>;

    fn sload(&self, contract: Address, slot: B256) -> U256;

    fn sstore(&self, contract: Address, slot: B256, value: U256);

    fn emit(&self, log: Log);

    fn timestamp(&self) -> u64;

    fn checkpoint(&self) -> Checkpoint;

    fn commit(&self, checkpoint: Checkpoint);

    fn revert(&self, checkpoint: Checkpoint);
}

/// Code living at an address on a [`Host`].
pub trait Contract: Send + Sync {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted>;
}
