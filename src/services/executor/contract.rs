// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::infrastructure::chain::{CallContext, Contract, Host, Reverted};
use crate::infrastructure::data::executor::HopExecutor::HopExecutorCalls;
use crate::services::executor::{ExecuteRequest, HopExecutor};
use alloy::primitives::Bytes;
use alloy_sol_types::{SolInterface, SolValue};

/// ABI entry point: lets routers and scripts reach the executor through the host
/// exactly as they would on chain, re-entrancy included.
impl Contract for HopExecutor {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        let Ok(decoded) = HopExecutorCalls::abi_decode(input) else {
            return Err(Reverted::default());
        };

        let result = match decoded {
            HopExecutorCalls::execute(call) => self
                .execute(host, ctx.caller, &ExecuteRequest::from(call))
                .map(|profit| profit.abi_encode()),
            HopExecutorCalls::simulate(call) => self
                .simulate(host, &call.hops, call.inputToken, call.amountIn)
                .map(|out| out.abi_encode()),
            HopExecutorCalls::setOwner(call) => self
                .set_owner(host, ctx.caller, call.newOwner)
                .map(|()| Vec::new()),
            HopExecutorCalls::sweep(call) => self
                .sweep(host, ctx.caller, call.token, call.to)
                .map(|_| Vec::new()),
            HopExecutorCalls::owner(_) => Ok(self.owner(host).abi_encode()),
            HopExecutorCalls::permit2(_) => Ok(self.default_permit2().abi_encode()),
        };

        result
            .map(Bytes::from)
            .map_err(|err| Reverted::new(err.revert_data()))
    }
}
