// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Call shapes of the external collaborators the executor talks to.

use alloy::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    contract ERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function balanceOf(address) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transfer(address to, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
    }

    #[derive(Debug, PartialEq, Eq)]
    contract UniV2Router {
        function swapExactTokensForTokens(uint256 amountIn, uint256 amountOutMin, address[] calldata path, address to, uint256 deadline) returns (uint256[] memory amounts);
        function getAmountsOut(uint256 amountIn, address[] calldata path) external view returns (uint256[] memory amounts);
    }

    #[derive(Debug, PartialEq, Eq)]
    contract UniV3Router {
        struct ExactInputSingleParams {
            address tokenIn;
            address tokenOut;
            uint24 fee;
            address recipient;
            uint256 deadline;
            uint256 amountIn;
            uint256 amountOutMinimum;
            uint160 sqrtPriceLimitX96;
        }
        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
    }

    #[derive(Debug, PartialEq, Eq)]
    contract UniV3Quoter {
        function quoteExactInputSingle(address tokenIn, address tokenOut, uint24 fee, uint256 amountIn, uint160 sqrtPriceLimitX96) external returns (uint256 amountOut);
    }

    #[derive(Debug, PartialEq, Eq)]
    contract SolidlyRouter {
        function swapExactTokensForTokensSimple(uint256 amountIn, uint256 amountOutMin, address tokenFrom, address tokenTo, bool stable, address to, uint256 deadline) external returns (uint256[] memory amounts);
    }

    #[derive(Debug, PartialEq, Eq)]
    contract SolidlyPair {
        function getAmountOut(uint256 amountIn, address tokenIn) external view returns (uint256);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;

    #[test]
    fn venue_selectors_match_deployed_routers() {
        assert_eq!(hex::encode(ERC20::transferCall::SELECTOR), "a9059cbb");
        assert_eq!(hex::encode(ERC20::transferFromCall::SELECTOR), "23b872dd");
        assert_eq!(hex::encode(ERC20::approveCall::SELECTOR), "095ea7b3");
        assert_eq!(hex::encode(ERC20::balanceOfCall::SELECTOR), "70a08231");
        assert_eq!(hex::encode(ERC20::allowanceCall::SELECTOR), "dd62ed3e");
        assert_eq!(
            hex::encode(UniV2Router::swapExactTokensForTokensCall::SELECTOR),
            "38ed1739"
        );
        assert_eq!(hex::encode(UniV2Router::getAmountsOutCall::SELECTOR), "d06ca61f");
        assert_eq!(
            hex::encode(UniV3Router::exactInputSingleCall::SELECTOR),
            "414bf389"
        );
        assert_eq!(
            hex::encode(UniV3Quoter::quoteExactInputSingleCall::SELECTOR),
            "f7729d43"
        );
    }
}
