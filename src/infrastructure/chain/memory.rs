// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::infrastructure::chain::host::{CallContext, Checkpoint, Contract, Host, Reverted};
use crate::infrastructure::data::abi::ERC20;
use alloy::primitives::{Address, B256, Bytes, Log, U256};
use alloy_sol_types::SolCall;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

const MAX_CALL_DEPTH: usize = 1024;

#[derive(Clone, Default)]
struct State {
    storage: HashMap<(Address, B256), U256>,
    logs: Vec<Log>,
}

/// Deterministic in-process chain: word storage, an event log and a journal of
/// full-state snapshots backing checkpoints. Contracts are registered per address;
/// calls to an address without code succeed with empty return data.
pub struct MemoryChain {
    state: Mutex<State>,
    journal: Mutex<Vec<State>>,
    contracts: RwLock<HashMap<Address, Arc<dyn Contract>>>,
    timestamp: AtomicU64,
    depth: AtomicUsize,
}

impl Default for MemoryChain {
    fn default() -> Self {
        Self::new(0)
    }
}

impl MemoryChain {
    pub fn new(timestamp: u64) -> Self {
        Self {
            state: Mutex::new(State::default()),
            journal: Mutex::new(Vec::new()),
            contracts: RwLock::new(HashMap::new()),
            timestamp: AtomicU64::new(timestamp),
            depth: AtomicUsize::new(0),
        }
    }

    pub fn deploy(&self, address: Address, contract: Arc<dyn Contract>) {
        self.contracts
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(address, contract);
        tracing::debug!(target: "sandbox", %address, "contract deployed");
    }

    pub fn has_code(&self, address: Address) -> bool {
        self.contracts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&address)
    }

    pub fn set_timestamp(&self, timestamp: u64) {
        self.timestamp.store(timestamp, Ordering::Relaxed);
    }

    pub fn logs(&self) -> Vec<Log> {
        self.state().logs.clone()
    }

    pub fn logs_for(&self, address: Address) -> Vec<Log> {
        self.state()
            .logs
            .iter()
            .filter(|log| log.address == address)
            .cloned()
            .collect()
    }

    /// `balanceOf` through the token's own code; zero if the call fails.
    pub fn balance_of(&self, token: Address, owner: Address) -> U256 {
        let input = ERC20::balanceOfCall(owner).abi_encode();
        self.static_call(Address::ZERO, token, &input)
            .ok()
            .and_then(|out| ERC20::balanceOfCall::abi_decode_returns(&out).ok())
            .unwrap_or_default()
    }

    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> U256 {
        let input = ERC20::allowanceCall { owner, spender }.abi_encode();
        self.static_call(Address::ZERO, token, &input)
            .ok()
            .and_then(|out| ERC20::allowanceCall::abi_decode_returns(&out).ok())
            .unwrap_or_default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn journal(&self) -> MutexGuard<'_, Vec<State>> {
        self.journal.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn contract(&self, address: Address) -> Option<Arc<dyn Contract>> {
        self.contracts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&address)
            .cloned()
    }

    fn dispatch(
        &self,
        caller: Address,
        target: Address,
        input: &[u8],
        keep_state: bool,
    ) -> Result<Bytes, Reverted> {
        let Some(contract) = self.contract(target) else {
            return Ok(Bytes::new());
        };
        if self.depth.fetch_add(1, Ordering::SeqCst) >= MAX_CALL_DEPTH {
            self.depth.fetch_sub(1, Ordering::SeqCst);
            return Err(Reverted::default());
        }

        let checkpoint = self.checkpoint();
        let ctx = CallContext {
            caller,
            address: target,
        };
        let result = contract.call(self, ctx, input);
        self.depth.fetch_sub(1, Ordering::SeqCst);

        if keep_state && result.is_ok() {
            self.commit(checkpoint);
        } else {
            self.revert(checkpoint);
        }
        result
    }
}

impl Host for MemoryChain {
    fn call(&self, caller: Address, target: Address, input: &[u8]) -> Result<Bytes, Reverted> {
        self.dispatch(caller, target, input, true)
    }

    fn static_call(
        &self,
        caller: Address,
        target: Address,
        input: &[u8],
    ) -> Result<Bytes, Reverted> {
        self.dispatch(caller, target, input, false)
    }

    fn sload(&self, contract: Address, slot: B256) -> U256 {
        self.state()
            .storage
            .get(&(contract, slot))
            .copied()
            .unwrap_or_default()
    }

    fn sstore(&self, contract: Address, slot: B256, value: U256) {
        let mut state = self.state();
        if value.is_zero() {
            state.storage.remove(&(contract, slot));
        } else {
            state.storage.insert((contract, slot), value);
        }
    }

    fn emit(&self, log: Log) {
        self.state().logs.push(log);
    }

    fn timestamp(&self) -> u64 {
        self.timestamp.load(Ordering::Relaxed)
    }

    fn checkpoint(&self) -> Checkpoint {
        let snapshot = self.state().clone();
        let mut journal = self.journal();
        journal.push(snapshot);
        Checkpoint(journal.len() - 1)
    }

    fn commit(&self, checkpoint: Checkpoint) {
        self.journal().truncate(checkpoint.0);
    }

    fn revert(&self, checkpoint: Checkpoint) {
        let snapshot = {
            let mut journal = self.journal();
            journal.truncate(checkpoint.0 + 1);
            journal.pop()
        };
        if let Some(snapshot) = snapshot {
            *self.state() = snapshot;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::LogData;

    struct Counter;

    impl Contract for Counter {
        fn call(
            &self,
            host: &dyn Host,
            ctx: CallContext,
            input: &[u8],
        ) -> Result<Bytes, Reverted> {
            let slot = B256::ZERO;
            let next = host.sload(ctx.address, slot) + U256::from(1u64);
            host.sstore(ctx.address, slot, next);
            host.emit(Log {
                address: ctx.address,
                data: LogData::new_unchecked(vec![], Bytes::new()),
            });
            if input.first() == Some(&0xff) {
                return Err(Reverted::reason("boom"));
            }
            Ok(Bytes::from(next.to_be_bytes::<32>().to_vec()))
        }
    }

    #[test]
    fn reverted_frames_leave_no_storage_or_logs() {
        let chain = MemoryChain::new(1);
        let counter = Address::from([0xc0; 20]);
        chain.deploy(counter, Arc::new(Counter));

        chain.call(Address::ZERO, counter, &[0x01]).expect("first call");
        assert!(chain.call(Address::ZERO, counter, &[0xff]).is_err());

        assert_eq!(chain.sload(counter, B256::ZERO), U256::from(1u64));
        assert_eq!(chain.logs_for(counter).len(), 1);
    }

    #[test]
    fn static_calls_never_persist() {
        let chain = MemoryChain::new(1);
        let counter = Address::from([0xc1; 20]);
        chain.deploy(counter, Arc::new(Counter));

        let out = chain
            .static_call(Address::ZERO, counter, &[0x01])
            .expect("static call");
        assert_eq!(U256::from_be_slice(&out), U256::from(1u64));
        assert_eq!(chain.sload(counter, B256::ZERO), U256::ZERO);
        assert!(chain.logs().is_empty());
    }

    #[test]
    fn nested_checkpoints_unwind_in_order() {
        let chain = MemoryChain::new(1);
        let a = Address::from([0xaa; 20]);
        let outer = chain.checkpoint();
        chain.sstore(a, B256::ZERO, U256::from(1u64));
        let inner = chain.checkpoint();
        chain.sstore(a, B256::ZERO, U256::from(2u64));
        chain.revert(inner);
        assert_eq!(chain.sload(a, B256::ZERO), U256::from(1u64));
        chain.revert(outer);
        assert_eq!(chain.sload(a, B256::ZERO), U256::ZERO);
    }

    #[test]
    fn calls_to_accounts_without_code_succeed_empty() {
        let chain = MemoryChain::new(1);
        let out = chain
            .call(Address::ZERO, Address::from([0x42; 20]), &[1, 2, 3])
            .expect("eoa call");
        assert!(out.is_empty());
        assert!(!chain.has_code(Address::from([0x42; 20])));
    }
}
