// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Signature-transfer half of Permit2, verified the same way the deployed
//! contract does it: EIP-712 over `PermitTransferFrom` with the calling contract
//! as spender, unordered nonces, and `transferFrom` from the signer.

use crate::infrastructure::chain::{CallContext, Contract, Host, Reverted};
use crate::infrastructure::data::abi::ERC20;
use crate::infrastructure::data::executor::Permit2::{self, Permit2Calls};
use crate::infrastructure::data::executor::PermitTransferFrom;
use alloy::primitives::{Address, B256, Bytes, Signature, U256, keccak256};
use alloy::signers::SignerSync;
use alloy::signers::local::PrivateKeySigner;
use alloy_sol_types::{Eip712Domain, SolCall, SolError, SolInterface, SolStruct, SolValue, eip712_domain};

mod typed {
    alloy::sol! {
        struct TokenPermissions {
            address token;
            uint256 amount;
        }

        struct PermitTransferFrom {
            TokenPermissions permitted;
            address spender;
            uint256 nonce;
            uint256 deadline;
        }
    }
}

const NONCE_SLOT: u64 = 2;

pub fn domain(chain_id: u64, permit2: Address) -> Eip712Domain {
    eip712_domain! {
        name: "Permit2",
        chain_id: chain_id,
        verifying_contract: permit2,
    }
}

/// EIP-712 digest the owner signs for `permit`, redeemable by `spender`.
pub fn permit_digest(chain_id: u64, permit2: Address, permit: &PermitTransferFrom, spender: Address) -> B256 {
    let typed = typed::PermitTransferFrom {
        permitted: typed::TokenPermissions {
            token: permit.permitted.token,
            amount: permit.permitted.amount,
        },
        spender,
        nonce: permit.nonce,
        deadline: permit.deadline,
    };
    typed.eip712_signing_hash(&domain(chain_id, permit2))
}

/// 65-byte `r || s || v` signature over [`permit_digest`].
pub fn sign_permit(
    signer: &PrivateKeySigner,
    chain_id: u64,
    permit2: Address,
    permit: &PermitTransferFrom,
    spender: Address,
) -> Result<Bytes, alloy::signers::Error> {
    let digest = permit_digest(chain_id, permit2, permit, spender);
    let signature = signer.sign_hash_sync(&digest)?;
    Ok(Bytes::from(signature.as_bytes().to_vec()))
}

fn nonce_slot(owner: Address, nonce: U256) -> B256 {
    keccak256((owner, nonce, U256::from(NONCE_SLOT)).abi_encode())
}

#[derive(Clone, Copy, Debug)]
pub struct SandboxPermit2 {
    chain_id: u64,
}

impl SandboxPermit2 {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }

    pub fn nonce_used(host: &dyn Host, permit2: Address, owner: Address, nonce: U256) -> bool {
        !host.sload(permit2, nonce_slot(owner, nonce)).is_zero()
    }
}

impl Contract for SandboxPermit2 {
    fn call(&self, host: &dyn Host, ctx: CallContext, input: &[u8]) -> Result<Bytes, Reverted> {
        let Permit2Calls::permitTransferFrom(call) =
            Permit2Calls::abi_decode(input).map_err(|_| Reverted::default())?;
        let permit = &call.permit;

        if U256::from(host.timestamp()) > permit.deadline {
            return Err(Reverted::new(
                Permit2::SignatureExpired {
                    signatureDeadline: permit.deadline,
                }
                .abi_encode(),
            ));
        }
        if call.transferDetails.requestedAmount > permit.permitted.amount {
            return Err(Reverted::new(
                Permit2::InvalidAmount {
                    maxAmount: permit.permitted.amount,
                }
                .abi_encode(),
            ));
        }
        let slot = nonce_slot(call.owner, permit.nonce);
        if !host.sload(ctx.address, slot).is_zero() {
            return Err(Reverted::new(Permit2::InvalidNonce {}.abi_encode()));
        }

        let digest = permit_digest(self.chain_id, ctx.address, permit, ctx.caller);
        let signer = Signature::from_raw(&call.signature)
            .ok()
            .and_then(|sig| sig.recover_address_from_prehash(&digest).ok());
        if signer != Some(call.owner) {
            return Err(Reverted::new(Permit2::InvalidSigner {}.abi_encode()));
        }

        host.sstore(ctx.address, slot, U256::from(1u64));
        let pull = ERC20::transferFromCall {
            from: call.owner,
            to: call.transferDetails.to,
            amount: call.transferDetails.requestedAmount,
        };
        host.call(ctx.address, permit.permitted.token, &pull.abi_encode())?;
        tracing::trace!(
            target: "sandbox",
            owner = %call.owner,
            spender = %ctx.caller,
            to = %call.transferDetails.to,
            amount = %call.transferDetails.requestedAmount,
            "permit redeemed"
        );
        Ok(Bytes::new())
    }
}
