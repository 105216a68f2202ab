// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use alloy::sol;

sol! {
    /// Permit2 signature-transfer permission: which token and how much.
    #[derive(Debug, PartialEq, Eq)]
    struct TokenPermissions {
        address token;
        uint256 amount;
    }

    /// Signed Permit2 payload. Opaque to the executor; validated by Permit2.
    #[derive(Debug, PartialEq, Eq)]
    struct PermitTransferFrom {
        TokenPermissions permitted;
        uint256 nonce;
        uint256 deadline;
    }

    #[derive(Debug, PartialEq, Eq)]
    struct SignatureTransferDetails {
        address to;
        uint256 requestedAmount;
    }

    /// Delegated-transfer bundle passed once per `execute`.
    /// `permit2 == 0` selects the service configured at deployment.
    #[derive(Debug, PartialEq, Eq)]
    struct Permit2Data {
        address permit2;
        PermitTransferFrom permit;
        SignatureTransferDetails transferDetails;
        bytes signature;
    }

    /// One swap step. `amountIn == 0` means "spend the executor's current balance".
    #[derive(Debug, PartialEq, Eq)]
    struct Hop {
        uint8 protocol;
        address router;
        address pool;
        address quoter;
        address tokenIn;
        address tokenOut;
        uint256 amountIn;
        uint24 fee;
        bool stable;
        uint256 minOut;
        uint256 deadline;
        uint160 sqrtPriceLimitX96;
    }

    /// Uniswap Permit2, signature-transfer half.
    #[derive(Debug, PartialEq, Eq)]
    contract Permit2 {
        function permitTransferFrom(
            PermitTransferFrom memory permit,
            SignatureTransferDetails calldata transferDetails,
            address owner,
            bytes calldata signature
        ) external;

        error SignatureExpired(uint256 signatureDeadline);
        error InvalidNonce();
        error InvalidAmount(uint256 maxAmount);
        error InvalidSigner();
    }

    #[derive(Debug, PartialEq, Eq)]
    contract HopExecutor {
        event Executed(
            address indexed caller,
            address indexed recipient,
            address inputToken,
            uint256 amountIn,
            int256 profit,
            address terminalToken
        );
        event OwnerChanged(address indexed previousOwner, address indexed newOwner);
        event Swept(address indexed token, address indexed to, uint256 amount);

        function execute(
            Hop[] calldata hops,
            address inputToken,
            uint256 amountIn,
            uint256 minProfit,
            address recipient,
            bool pullFromSender,
            Permit2Data calldata permit
        ) external returns (int256 profit);

        function simulate(
            Hop[] calldata hops,
            address inputToken,
            uint256 amountIn
        ) external returns (uint256 expectedOut);

        function setOwner(address newOwner) external;
        function sweep(address token, address to) external;
        function owner() external view returns (address);
        function permit2() external view returns (address);

        error NoHops();
        error BadRecipient();
        error ZeroInput(uint256 hop);
        error BadProtocol(uint8 protocol);
        error InsufficientProfit(uint256 profit, uint256 minProfit);
        error Reentrant();
        error OnlyOwner();
        error TransferFailed(address token);
        error TransferFromFailed(address token);
        error ApproveFailed(address token, address spender);
        error BalanceQueryFailed(address token);
    }
}

impl Permit2Data {
    /// Bundle that forces the plain `transferFrom` acquisition path.
    pub fn none() -> Self {
        Self {
            permit2: alloy::primitives::Address::ZERO,
            permit: PermitTransferFrom {
                permitted: TokenPermissions {
                    token: alloy::primitives::Address::ZERO,
                    amount: alloy::primitives::U256::ZERO,
                },
                nonce: alloy::primitives::U256::ZERO,
                deadline: alloy::primitives::U256::ZERO,
            },
            transferDetails: SignatureTransferDetails {
                to: alloy::primitives::Address::ZERO,
                requestedAmount: alloy::primitives::U256::ZERO,
            },
            signature: Default::default(),
        }
    }
}
