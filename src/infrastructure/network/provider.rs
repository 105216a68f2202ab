// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@on1.no>

use crate::common::error::AppError;
use alloy::network::Ethereum;
use alloy::providers::RootProvider;
use url::Url;

pub type HttpProvider = RootProvider<Ethereum>;

pub struct ConnectionFactory;

impl ConnectionFactory {
    pub fn http(rpc_url: &str) -> Result<HttpProvider, AppError> {
        let url =
            Url::parse(rpc_url).map_err(|e| AppError::Config(format!("Invalid RPC URL: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "RPC URL must be http(s), got {}",
                url.scheme()
            )));
        }

        tracing::debug!(target: "rpc", host = url.host_str().unwrap_or_default(), "http provider ready");
        Ok(RootProvider::new_http(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_and_non_http_urls() {
        assert!(matches!(
            ConnectionFactory::http("not a url"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            ConnectionFactory::http("ws://localhost:8546"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn accepts_http_endpoints() {
        assert!(ConnectionFactory::http("http://127.0.0.1:8545").is_ok());
    }
}
