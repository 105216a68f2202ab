// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

mod common;

use alloy::primitives::{Address, Bytes, U256};
use alloy::signers::local::PrivateKeySigner;
use common::*;
use oxidity_hops::data::executor::{
    Permit2Data, PermitTransferFrom, SignatureTransferDetails, TokenPermissions,
};
use oxidity_hops::domain::error::ExecutorError;
use oxidity_hops::sandbox::{SandboxPermit2, TokenStyle, deal, set_allowance, sign_permit};
use oxidity_hops::services::executor::ExecuteRequest;
use oxidity_hops::services::revert::decode_executor_revert;
use std::sync::Arc;

const PERMIT2: Address = Address::repeat_byte(0x9e);
const CHAIN_ID: u64 = 1;
// anvil account #0
const SIGNER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

struct Fixture {
    world: World,
    signer: PrivateKeySigner,
    amount: U256,
}

impl Fixture {
    fn new() -> Self {
        let world = World::with_styles(TokenStyle::Bool, TokenStyle::Bool, PERMIT2);
        world
            .chain
            .deploy(PERMIT2, Arc::new(SandboxPermit2::new(CHAIN_ID)));
        let signer: PrivateKeySigner = SIGNER_KEY.parse().expect("key");
        let amount = U256::from(100u64);
        deal(world.host(), WETH, signer.address(), amount);
        // Owners approve Permit2 once, never the executor.
        set_allowance(world.host(), WETH, signer.address(), PERMIT2, U256::MAX);
        Self {
            world,
            signer,
            amount,
        }
    }

    fn owner(&self) -> Address {
        self.signer.address()
    }

    fn permit(&self, nonce: u64) -> PermitTransferFrom {
        PermitTransferFrom {
            permitted: TokenPermissions {
                token: WETH,
                amount: self.amount,
            },
            nonce: U256::from(nonce),
            deadline: U256::from(NOW + 300),
        }
    }

    fn signed(&self, permit: PermitTransferFrom, spender: Address, to: Address) -> Permit2Data {
        let signature =
            sign_permit(&self.signer, CHAIN_ID, PERMIT2, &permit, spender).expect("sign");
        Permit2Data {
            permit2: Address::ZERO,
            permit,
            transferDetails: SignatureTransferDetails {
                to,
                requestedAmount: U256::ZERO,
            },
            signature,
        }
    }

    fn request(&self, auth: Permit2Data) -> ExecuteRequest {
        ExecuteRequest::new(vec![par_hop(WETH, USDC)], WETH, self.amount, self.owner())
            .pulling(auth)
    }

    fn execute(&self, auth: Permit2Data) -> Result<alloy::primitives::I256, ExecutorError> {
        self.world
            .executor
            .execute(self.world.host(), self.owner(), &self.request(auth))
    }
}

#[test]
fn signed_permit_pulls_into_custody_whatever_destination_was_given() {
    let fx = Fixture::new();
    let diverted = Address::repeat_byte(0xbd);
    let auth = fx.signed(fx.permit(7), EXECUTOR, diverted);

    fx.execute(auth).expect("execute");

    assert_eq!(fx.world.balance(WETH, diverted), U256::ZERO);
    assert_eq!(fx.world.balance(WETH, fx.owner()), U256::ZERO);
    assert_eq!(fx.world.balance(USDC, fx.owner()), fx.amount);
    assert_eq!(fx.world.chain.allowance(WETH, fx.owner(), EXECUTOR), U256::ZERO);
    assert!(SandboxPermit2::nonce_used(
        fx.world.host(),
        PERMIT2,
        fx.owner(),
        U256::from(7u64)
    ));
}

#[test]
fn requested_amount_is_passed_through_with_custody_as_destination() {
    let fx = Fixture::new();
    let requested = U256::from(60u64);
    let diverted = Address::repeat_byte(0xbd);
    let mut auth = fx.signed(fx.permit(8), EXECUTOR, diverted);
    auth.transferDetails.requestedAmount = requested;

    fx.execute(auth).expect("execute");

    assert_eq!(fx.world.balance(WETH, diverted), U256::ZERO);
    assert_eq!(fx.world.balance(WETH, fx.owner()), fx.amount - requested);
    assert_eq!(fx.world.balance(USDC, fx.owner()), requested);
    assert_eq!(fx.world.balance(WETH, EXECUTOR), U256::ZERO);
    assert!(SandboxPermit2::nonce_used(
        fx.world.host(),
        PERMIT2,
        fx.owner(),
        U256::from(8u64)
    ));
}

#[test]
fn replayed_permit_is_refused_by_the_service() {
    let fx = Fixture::new();
    fx.execute(fx.signed(fx.permit(1), EXECUTOR, Address::ZERO))
        .expect("first");

    deal(fx.world.host(), WETH, fx.owner(), fx.amount);
    let err = fx
        .execute(fx.signed(fx.permit(1), EXECUTOR, Address::ZERO))
        .expect_err("replay");

    assert!(matches!(err, ExecutorError::CallReverted { target, .. } if target == PERMIT2));
    assert_eq!(
        decode_executor_revert(&err.revert_data()),
        "Permit2: nonce already used"
    );
    assert_eq!(fx.world.balance(WETH, fx.owner()), fx.amount);
}

#[test]
fn permit_for_another_spender_or_past_deadline_fails() {
    let fx = Fixture::new();
    let err = fx
        .execute(fx.signed(fx.permit(2), STRANGER, Address::ZERO))
        .expect_err("wrong spender");
    assert_eq!(decode_executor_revert(&err.revert_data()), "Permit2: invalid signature");

    fx.world.chain.set_timestamp(NOW + 301);
    let err = fx
        .execute(fx.signed(fx.permit(3), EXECUTOR, Address::ZERO))
        .expect_err("expired");
    assert!(decode_executor_revert(&err.revert_data()).starts_with("Permit2: signature expired"));
    assert_eq!(fx.world.balance(WETH, fx.owner()), fx.amount);
}

#[test]
fn empty_signature_falls_back_to_transfer_from() {
    let fx = Fixture::new();
    let mut auth = fx.signed(fx.permit(4), EXECUTOR, Address::ZERO);
    auth.signature = Bytes::new();

    assert_eq!(
        fx.execute(auth.clone()),
        Err(ExecutorError::TransferFromFailed { token: WETH })
    );
    assert_eq!(fx.world.balance(WETH, fx.owner()), fx.amount);

    set_allowance(fx.world.host(), WETH, fx.owner(), EXECUTOR, fx.amount);
    fx.execute(auth).expect("approved fallback");
    assert_eq!(fx.world.balance(USDC, fx.owner()), fx.amount);
    assert!(!SandboxPermit2::nonce_used(
        fx.world.host(),
        PERMIT2,
        fx.owner(),
        U256::from(4u64)
    ));
}

#[test]
fn no_pull_requested_means_no_acquisition() {
    let fx = Fixture::new();
    let auth = fx.signed(fx.permit(5), EXECUTOR, Address::ZERO);
    let mut request = fx.request(auth);
    request.pull_from_sender = false;

    let err = fx
        .world
        .executor
        .execute(fx.world.host(), fx.owner(), &request)
        .expect_err("custody is empty");
    assert_eq!(err, ExecutorError::ZeroInput { hop: 0 });
    assert_eq!(fx.world.balance(WETH, fx.owner()), fx.amount);
}
