// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use alloy::primitives::{Address, address};

// =============================================================================
// PROTOCOL TAGS (wire values of `Hop.protocol`)
// =============================================================================

pub const PROTOCOL_V2: u8 = 1;
pub const PROTOCOL_V3: u8 = 2;
pub const PROTOCOL_SOLIDLY: u8 = 3;

// =============================================================================
// EXTERNAL SERVICES
// =============================================================================

/// Canonical Permit2 deployment (same address on every major chain).
pub const PERMIT2: Address = address!("000000000022D473030F116dDEE9F6B43aC78BA3");

// =============================================================================
// GAS & TRANSACTION CONSTANTS
// =============================================================================

pub const DEFAULT_SIMULATE_GAS_LIMIT: u64 = 200_000;
pub const DEFAULT_EXECUTE_GAS_LIMIT: u64 = 1_500_000;
pub const DEFAULT_DEADLINE_SECS: u64 = 120;
pub const DEFAULT_RPC_RETRY_ATTEMPTS: usize = 3;

/// Denominator for basis-point slippage math.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Bound on revert payload bytes rendered into log lines.
pub const MAX_REVERT_LOG_BYTES: usize = 256;
