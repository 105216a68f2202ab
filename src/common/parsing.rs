// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use alloy::primitives::{Bytes, U256};

pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

pub fn parse_hex_bytes(s: &str) -> Option<Bytes> {
    hex::decode(strip_0x(s.trim())).ok().map(Bytes::from)
}

pub fn parse_u256_hex(s: &str) -> Option<U256> {
    U256::from_str_radix(strip_0x(s), 16).ok()
}

/// Token amount in decimal, or hex with a `0x` prefix. `_` separators allowed.
pub fn parse_u256(raw: &str) -> Option<U256> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.starts_with("0x") || cleaned.starts_with("0X") {
        return parse_u256_hex(&cleaned);
    }
    U256::from_str_radix(&cleaned, 10).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsers_accept_lower_and_upper_prefixes() {
        assert_eq!(parse_u256_hex("0X0"), Some(U256::ZERO));
        assert_eq!(parse_u256_hex("0x2a"), Some(U256::from(42u64)));
        assert_eq!(
            parse_hex_bytes("0Xabcd"),
            Some(Bytes::from(vec![0xab, 0xcd]))
        );
    }

    #[test]
    fn amounts_parse_in_decimal_and_hex() {
        assert_eq!(parse_u256("1_000"), Some(U256::from(1000u64)));
        assert_eq!(parse_u256("0x3e8"), Some(U256::from(1000u64)));
        assert_eq!(
            parse_u256("1000000000000000000000"),
            Some(U256::from(10u64).pow(U256::from(21u64)))
        );
        assert_eq!(parse_u256(""), None);
        assert_eq!(parse_u256("12ab"), None);
    }
}
