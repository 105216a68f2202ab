// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Atomic multi-hop swap executor.
//!
//! `execute` pulls the input (optionally), runs every hop through its venue adapter,
//! settles the gain to the recipient and emits `Executed`. Any failure reverts the
//! host back to the checkpoint taken on entry, so balances and allowances are left
//! exactly as they were.

pub mod acquisition;
pub mod adapters;
pub mod allowance;
pub mod contract;
pub mod custody;
pub mod guard;
pub mod settlement;
pub mod simulation;

use crate::domain::error::ExecutorError;
use crate::infrastructure::chain::Host;
use crate::infrastructure::data::executor::{HopExecutor as HopExecutorAbi, Hop, Permit2Data};
use adapters::Adapter;
use alloy::primitives::{Address, B256, I256, Log, U256};
use alloy_sol_types::SolEvent;
use custody::Custody;
use guard::ReentrancyGuard;
use settlement::SettleParams;

const OWNER_SLOT: B256 = B256::ZERO;

/// Arguments of one `execute` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecuteRequest {
    pub hops: Vec<Hop>,
    pub input_token: Address,
    pub amount_in: U256,
    pub min_profit: U256,
    pub recipient: Address,
    pub pull_from_sender: bool,
    pub permit: Permit2Data,
}

impl ExecuteRequest {
    pub fn new(hops: Vec<Hop>, input_token: Address, amount_in: U256, recipient: Address) -> Self {
        Self {
            hops,
            input_token,
            amount_in,
            min_profit: U256::ZERO,
            recipient,
            pull_from_sender: false,
            permit: Permit2Data::none(),
        }
    }

    pub fn with_min_profit(mut self, min_profit: U256) -> Self {
        self.min_profit = min_profit;
        self
    }

    /// Pull `amount_in` from the caller before the first hop.
    pub fn pulling(mut self, permit: Permit2Data) -> Self {
        self.pull_from_sender = true;
        self.permit = permit;
        self
    }

    pub fn into_call(self) -> HopExecutorAbi::executeCall {
        HopExecutorAbi::executeCall {
            hops: self.hops,
            inputToken: self.input_token,
            amountIn: self.amount_in,
            minProfit: self.min_profit,
            recipient: self.recipient,
            pullFromSender: self.pull_from_sender,
            permit: self.permit,
        }
    }
}

impl From<HopExecutorAbi::executeCall> for ExecuteRequest {
    fn from(call: HopExecutorAbi::executeCall) -> Self {
        Self {
            hops: call.hops,
            input_token: call.inputToken,
            amount_in: call.amountIn,
            min_profit: call.minProfit,
            recipient: call.recipient,
            pull_from_sender: call.pullFromSender,
            permit: call.permit,
        }
    }
}

/// Executor deployed at `address`. Owner lives in host storage so it rolls back
/// with everything else; the reentrancy lock is per instance.
pub struct HopExecutor {
    address: Address,
    default_permit2: Address,
    guard: ReentrancyGuard,
}

impl HopExecutor {
    /// Construct at `address` with `deployer` as owner. The default Permit2
    /// service is fixed for the lifetime of the instance.
    pub fn deploy(host: &dyn Host, address: Address, deployer: Address, default_permit2: Address) -> Self {
        let executor = Self {
            address,
            default_permit2,
            guard: ReentrancyGuard::new(),
        };
        executor.store_owner(host, deployer);
        executor.emit(
            host,
            &HopExecutorAbi::OwnerChanged {
                previousOwner: Address::ZERO,
                newOwner: deployer,
            },
        );
        tracing::info!(target: "executor", %address, owner = %deployer, permit2 = %default_permit2, "executor deployed");
        executor
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn default_permit2(&self) -> Address {
        self.default_permit2
    }

    pub fn owner(&self, host: &dyn Host) -> Address {
        let word = host.sload(self.address, OWNER_SLOT);
        Address::from_word(B256::from(word.to_be_bytes::<32>()))
    }

    pub fn is_locked(&self) -> bool {
        self.guard.is_locked()
    }

    pub fn execute(
        &self,
        host: &dyn Host,
        caller: Address,
        request: &ExecuteRequest,
    ) -> Result<I256, ExecutorError> {
        let _lock = self.guard.enter()?;
        let checkpoint = host.checkpoint();
        match self.execute_locked(host, caller, request) {
            Ok(profit) => {
                host.commit(checkpoint);
                Ok(profit)
            }
            Err(err) => {
                host.revert(checkpoint);
                tracing::warn!(target: "executor", %caller, error = %err, "execute reverted");
                Err(err)
            }
        }
    }

    fn execute_locked(
        &self,
        host: &dyn Host,
        caller: Address,
        request: &ExecuteRequest,
    ) -> Result<I256, ExecutorError> {
        let Some(last) = request.hops.last() else {
            return Err(ExecutorError::NoHops);
        };
        if request.recipient.is_zero() {
            return Err(ExecutorError::BadRecipient);
        }

        let custody = Custody::new(host, self.address);
        let terminal_token = last.tokenOut;
        let baseline = custody.own_balance(terminal_token)?;

        if !request.amount_in.is_zero() && request.pull_from_sender {
            let via = acquisition::pull(
                &custody,
                self.default_permit2,
                request.input_token,
                caller,
                request.amount_in,
                &request.permit,
            )?;
            tracing::debug!(target: "executor", ?via, amount = %request.amount_in, "input acquired");
        }

        for (index, hop) in request.hops.iter().enumerate() {
            let amount = if hop.amountIn.is_zero() {
                custody.own_balance(hop.tokenIn)?
            } else {
                hop.amountIn
            };
            if amount.is_zero() {
                return Err(ExecutorError::ZeroInput { hop: index });
            }
            let adapter = Adapter::from_tag(hop.protocol)?;
            adapter.swap(&custody, hop, amount)?;
            tracing::debug!(
                target: "executor",
                hop = index,
                protocol = adapter.name(),
                router = %hop.router,
                token_in = %hop.tokenIn,
                token_out = %hop.tokenOut,
                %amount,
                "hop executed"
            );
        }

        let settlement = settlement::settle(
            &custody,
            &SettleParams {
                input_token: request.input_token,
                terminal_token,
                amount_in: request.amount_in,
                baseline,
                min_profit: request.min_profit,
                recipient: request.recipient,
            },
        )?;
        let profit = settlement.profit();

        self.emit(
            host,
            &HopExecutorAbi::Executed {
                caller,
                recipient: request.recipient,
                inputToken: request.input_token,
                amountIn: request.amount_in,
                profit,
                terminalToken: terminal_token,
            },
        );
        tracing::info!(
            target: "executor",
            %caller,
            recipient = %request.recipient,
            hops = request.hops.len(),
            %profit,
            "execute settled"
        );
        Ok(profit)
    }

    /// Read-only quote of `hops`. Bypasses the reentrancy lock.
    pub fn simulate(
        &self,
        host: &dyn Host,
        hops: &[Hop],
        input_token: Address,
        amount_in: U256,
    ) -> Result<U256, ExecutorError> {
        let custody = Custody::new(host, self.address);
        let out = simulation::quote_route(&custody, hops, amount_in)?;
        tracing::debug!(target: "simulation", %input_token, %amount_in, expected_out = %out, "route simulated");
        Ok(out)
    }

    pub fn set_owner(&self, host: &dyn Host, caller: Address, new_owner: Address) -> Result<(), ExecutorError> {
        let previous = self.only_owner(host, caller)?;
        let _lock = self.guard.enter()?;
        self.store_owner(host, new_owner);
        self.emit(
            host,
            &HopExecutorAbi::OwnerChanged {
                previousOwner: previous,
                newOwner: new_owner,
            },
        );
        tracing::info!(target: "executor", %previous, %new_owner, "owner changed");
        Ok(())
    }

    /// Move the executor's whole balance of `token` to `to`. Returns the amount swept.
    pub fn sweep(
        &self,
        host: &dyn Host,
        caller: Address,
        token: Address,
        to: Address,
    ) -> Result<U256, ExecutorError> {
        self.only_owner(host, caller)?;
        let _lock = self.guard.enter()?;
        let checkpoint = host.checkpoint();

        let result = (|| -> Result<U256, ExecutorError> {
            let custody = Custody::new(host, self.address);
            let amount = custody.own_balance(token)?;
            if !amount.is_zero() {
                custody.transfer(token, to, amount)?;
            }
            self.emit(host, &HopExecutorAbi::Swept { token, to, amount });
            Ok(amount)
        })();

        match result {
            Ok(amount) => {
                host.commit(checkpoint);
                tracing::info!(target: "executor", %token, %to, %amount, "swept");
                Ok(amount)
            }
            Err(err) => {
                host.revert(checkpoint);
                Err(err)
            }
        }
    }

    fn only_owner(&self, host: &dyn Host, caller: Address) -> Result<Address, ExecutorError> {
        let owner = self.owner(host);
        if caller != owner {
            return Err(ExecutorError::OnlyOwner);
        }
        Ok(owner)
    }

    fn store_owner(&self, host: &dyn Host, owner: Address) {
        host.sstore(
            self.address,
            OWNER_SLOT,
            U256::from_be_bytes(owner.into_word().0),
        );
    }

    fn emit<E: SolEvent>(&self, host: &dyn Host, event: &E) {
        host.emit(Log {
            address: self.address,
            data: event.encode_log_data(),
        });
    }
}
