// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

pub mod host;
pub mod memory;

pub use host::{CallContext, Checkpoint, Contract, Host, Reverted};
pub use memory::MemoryChain;
