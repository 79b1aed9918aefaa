//! Typed call interfaces for each protocol contract shape
//!
//! One interface per [`InterfaceShape`](quad_types::InterfaceShape); handles
//! encode and decode calls through these definitions.

use alloy_sol_types::sol;

sol! {
	/// Role-membership discovery surface of the protocol admin contract.
	interface IDiscovery {
		function getRoleMembers(bytes32 role) external view returns (address[] memory members);
	}

	/// ERC-20 surface of the protocol token and its pairing tokens.
	interface IToken {
		function name() external view returns (string memory name);
		function symbol() external view returns (string memory symbol);
		function balanceOf(address owner) external view returns (uint256 balance);
		function totalSupply() external view returns (uint256 supply);
		function approve(address spender, uint256 amount) external returns (bool approved);
	}

	/// Wrapper token representing a deposited liquidity-pool position.
	interface IWrappedLp {
		function _lpToken() external view returns (address lpToken);
	}

	/// Pool pair exposing the two backing tokens.
	interface ILiquidityPair {
		function token0() external view returns (address token);
		function token1() external view returns (address token);
	}

	/// Staking vault tracking locked positions, rewards and fee analytics.
	interface IVault {
		function getUserData(address token, address account)
			external
			view
			returns (
				uint256 stakedAmount,
				uint256 paidAmount,
				uint256 pendingRewards,
				uint256 lockedTokens
			);
		function currentAnalyticIndex() external view returns (uint256 index);
		function getMultipleAnalytics(uint256 startIndex, uint256 endIndex)
			external
			view
			returns (uint256 startBlock, uint256 endBlock, uint256 feeAmount);
		function deposit(address token, uint256 amount) external;
		function withdraw(address token, uint256 amount) external;
		function wrapAndDeposit(address token, uint256 amount) external;
	}

	/// Initial liquidity generation event (sale) contract.
	interface ISale {
		function _contributions(address account) external view returns (uint256 contributed);
		function _endTimestamp() external view returns (uint256 timestamp);
		function getClaimableTokens() external view returns (uint256 claimable);
		function contribute() external payable;
		function claimTokens() external;
	}
}
