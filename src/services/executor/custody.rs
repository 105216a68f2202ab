// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::ExecutorError;
use crate::infrastructure::chain::Host;
use crate::infrastructure::data::abi::ERC20;
use alloy::primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;

/// The executor's view of the host: every call is made from the executor's own
/// address. Token calls follow the SafeERC20 conventions (empty return data or a
/// `true` word is success; anything else fails).
pub struct Custody<'a> {
    host: &'a dyn Host,
    address: Address,
}

impl<'a> Custody<'a> {
    pub fn new(host: &'a dyn Host, address: Address) -> Self {
        Self { host, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn host(&self) -> &'a dyn Host {
        self.host
    }

    /// State-mutating call; reverts are bubbled unchanged.
    pub fn call(&self, target: Address, input: &[u8]) -> Result<Bytes, ExecutorError> {
        self.host
            .call(self.address, target, input)
            .map_err(|reverted| ExecutorError::CallReverted {
                target,
                data: reverted.data,
            })
    }

    pub fn static_call(&self, target: Address, input: &[u8]) -> Result<Bytes, ExecutorError> {
        self.host
            .static_call(self.address, target, input)
            .map_err(|reverted| ExecutorError::CallReverted {
                target,
                data: reverted.data,
            })
    }

    pub fn balance_of(&self, token: Address, owner: Address) -> Result<U256, ExecutorError> {
        let input = ERC20::balanceOfCall(owner).abi_encode();
        let out = self
            .host
            .static_call(self.address, token, &input)
            .map_err(|_| ExecutorError::BalanceQueryFailed { token })?;
        if out.len() < 32 {
            return Err(ExecutorError::BalanceQueryFailed { token });
        }
        Ok(U256::from_be_slice(&out[..32]))
    }

    /// Balance held by the executor itself.
    pub fn own_balance(&self, token: Address) -> Result<U256, ExecutorError> {
        self.balance_of(token, self.address)
    }

    pub fn allowance(&self, token: Address, spender: Address) -> Result<U256, ExecutorError> {
        let input = ERC20::allowanceCall {
            owner: self.address,
            spender,
        }
        .abi_encode();
        let failed = || ExecutorError::ApproveFailed { token, spender };
        let out = self
            .host
            .static_call(self.address, token, &input)
            .map_err(|_| failed())?;
        if out.len() < 32 {
            return Err(failed());
        }
        Ok(U256::from_be_slice(&out[..32]))
    }

    pub fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<(), ExecutorError> {
        let input = ERC20::approveCall { spender, amount }.abi_encode();
        match self.host.call(self.address, token, &input) {
            Ok(out) if returned_success(&out) => Ok(()),
            _ => Err(ExecutorError::ApproveFailed { token, spender }),
        }
    }

    pub fn transfer(&self, token: Address, to: Address, amount: U256) -> Result<(), ExecutorError> {
        let input = ERC20::transferCall { to, amount }.abi_encode();
        match self.host.call(self.address, token, &input) {
            Ok(out) if returned_success(&out) => Ok(()),
            _ => Err(ExecutorError::TransferFailed { token }),
        }
    }

    pub fn transfer_from(
        &self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), ExecutorError> {
        let input = ERC20::transferFromCall { from, to, amount }.abi_encode();
        match self.host.call(self.address, token, &input) {
            Ok(out) if returned_success(&out) => Ok(()),
            _ => Err(ExecutorError::TransferFromFailed { token }),
        }
    }
}

/// Empty return data (no-return tokens) or a leading word equal to `true`.
fn returned_success(out: &[u8]) -> bool {
    if out.is_empty() {
        return true;
    }
    out.len() >= 32 && U256::from_be_slice(&out[..32]) == U256::from(1u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(value: u64) -> Vec<u8> {
        U256::from(value).to_be_bytes::<32>().to_vec()
    }

    #[test]
    fn accepts_silent_and_true_returns() {
        assert!(returned_success(&[]));
        assert!(returned_success(&word(1)));
    }

    #[test]
    fn rejects_false_and_malformed_returns() {
        assert!(!returned_success(&word(0)));
        assert!(!returned_success(&word(2)));
        assert!(!returned_success(&[1u8]));
        assert!(!returned_success(&word(1)[..31]));
    }
}
