// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::infrastructure::chain::{CallContext, Contract, Host, Reverted};
use crate::infrastructure::data::abi::ERC20::{self, ERC20Calls};
use alloy::primitives::{Address, B256, Bytes, Log, U256, keccak256};
use alloy_sol_types::{SolEvent, SolInterface, SolValue};
use serde::Deserialize;

const BALANCES_SLOT: u64 = 0;
const ALLOWANCES_SLOT: u64 = 1;

/// Return-value convention of a sandbox token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStyle {
    /// Standard ERC-20: `true` on success.
    #[default]
    Bool,
    /// No return data (old USDT, BNB).
    Silent,
    /// Silent, and rejects nonzero to nonzero approvals.
    ResetRequired,
    /// Returns `false` from every mutating call without moving anything.
    Faulty,
}

/// `balances[owner]` storage slot (Solidity mapping at slot 0).
pub fn balance_slot(owner: Address) -> B256 {
    keccak256((owner, U256::from(BALANCES_SLOT)).abi_encode())
}

/// `allowances[owner][spender]` storage slot (nested mapping at slot 1).
pub fn allowance_slot(owner: Address, spender: Address) -> B256 {
    let inner = keccak256((owner, U256::from(ALLOWANCES_SLOT)).abi_encode());
    keccak256((spender, inner).abi_encode())
}

/// Write a balance straight into token storage.
pub fn deal(host: &dyn Host, token: Address, owner: Address, amount: U256) {
    host.sstore(token, balance_slot(owner), amount);
}

pub fn set_allowance(host: &dyn Host, token: Address, owner: Address, spender: Address, amount: U256) {
    host.sstore(token, allowance_slot(owner, spender), amount);
}

#[derive(Clone, Debug)]
pub struct SandboxToken {
    pub symbol: String,
    pub style: TokenStyle,
}

impl SandboxToken {
    pub fn new(symbol: impl Into<String>, style: TokenStyle) -> Self {
        Self {
            symbol: symbol.into(),
            style,
        }
    }

    fn success(&self) -> Bytes {
        match self.style {
            TokenStyle::Bool => Bytes::from(true.abi_encode()),
            _ => Bytes::new(),
        }
    }

    fn failure(&self) -> Bytes {
        Bytes::from(false.abi_encode())
    }

    fn move_balance(
        &self,
        host: &dyn Host,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Reverted> {
        let from_balance = host.sload(token, balance_slot(from));
        if from_balance < amount {
            return Err(Reverted::reason("ERC20: transfer amount exceeds balance"));
        }
        host.sstore(token, balance_slot(from), from_balance - amount);
        let to_balance = host.sload(token, balance_slot(to));
        host.sstore(token, balance_slot(to), to_balance.saturating_add(amount));
        emit(host, token, &ERC20::Transfer { from, to, value: amount });
        Ok(())
    }
}

impl Contract for SandboxToken {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        let token = ctx.address;
        let call = ERC20Calls::abi_decode(input).map_err(|_| Reverted::default())?;
        match call {
            ERC20Calls::balanceOf(c) => Ok(Bytes::from(
                host.sload(token, balance_slot(c.0)).abi_encode(),
            )),
            ERC20Calls::allowance(c) => Ok(Bytes::from(
                host.sload(token, allowance_slot(c.owner, c.spender)).abi_encode(),
            )),
            ERC20Calls::approve(c) => {
                if self.style == TokenStyle::Faulty {
                    return Ok(self.failure());
                }
                let slot = allowance_slot(ctx.caller, c.spender);
                if self.style == TokenStyle::ResetRequired
                    && !c.amount.is_zero()
                    && !host.sload(token, slot).is_zero()
                {
                    return Err(Reverted::reason("approve from non-zero allowance"));
                }
                host.sstore(token, slot, c.amount);
                emit(
                    host,
                    token,
                    &ERC20::Approval {
                        owner: ctx.caller,
                        spender: c.spender,
                        value: c.amount,
                    },
                );
                Ok(self.success())
            }
            ERC20Calls::transfer(c) => {
                if self.style == TokenStyle::Faulty {
                    return Ok(self.failure());
                }
                self.move_balance(host, token, ctx.caller, c.to, c.amount)?;
                Ok(self.success())
            }
            ERC20Calls::transferFrom(c) => {
                if self.style == TokenStyle::Faulty {
                    return Ok(self.failure());
                }
                let slot = allowance_slot(c.from, ctx.caller);
                let allowed = host.sload(token, slot);
                if allowed < c.amount {
                    return Err(Reverted::reason("ERC20: insufficient allowance"));
                }
                if allowed != U256::MAX {
                    host.sstore(token, slot, allowed - c.amount);
                }
                self.move_balance(host, token, c.from, c.to, c.amount)?;
                Ok(self.success())
            }
        }
    }
}

pub(crate) fn emit<E: SolEvent>(host: &dyn Host, address: Address, event: &E) {
    host.emit(Log {
        address,
        data: event.encode_log_data(),
    });
}
