// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::ExecutorError;
use crate::infrastructure::data::executor::{Permit2, Permit2Data, SignatureTransferDetails};
use crate::services::executor::custody::Custody;
use alloy::primitives::{Address, U256};
use alloy_sol_types::SolCall;

/// How the input amount entered custody.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquisition {
    Permit2 { service: Address },
    TransferFrom,
}

/// Bring `amount` of `token` from `owner` into custody. A signed bundle routed to a
/// resolvable Permit2 service takes the delegated path; everything else falls back
/// to `transferFrom`, which needs a prior approval.
///
/// Signature, nonce and expiry checks belong to the Permit2 service; a successful
/// return is taken as proof of transfer.
pub fn pull(
    custody: &Custody<'_>,
    default_permit2: Address,
    token: Address,
    owner: Address,
    amount: U256,
    auth: &Permit2Data,
) -> Result<Acquisition, ExecutorError> {
    let service = if auth.permit2.is_zero() {
        default_permit2
    } else {
        auth.permit2
    };

    if !service.is_zero() && !auth.signature.is_empty() {
        let requested = if auth.transferDetails.requestedAmount.is_zero() {
            amount
        } else {
            auth.transferDetails.requestedAmount
        };
        let call = Permit2::permitTransferFromCall {
            permit: auth.permit.clone(),
            transferDetails: SignatureTransferDetails {
                to: custody.address(),
                requestedAmount: requested,
            },
            owner,
            signature: auth.signature.clone(),
        };
        custody.call(service, &call.abi_encode())?;
        tracing::debug!(
            target: "acquisition",
            %service,
            %token,
            %owner,
            %requested,
            "input pulled via permit2"
        );
        return Ok(Acquisition::Permit2 { service });
    }

    custody.transfer_from(token, owner, custody.address(), amount)?;
    tracing::debug!(target: "acquisition", %token, %owner, %amount, "input pulled via transferFrom");
    Ok(Acquisition::TransferFrom)
}
