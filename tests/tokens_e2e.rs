//! End-to-end tests for the token read models

use std::sync::Arc;

use alloy_primitives::{address, Address, U256};
use quad_client::chain::abi::{ILiquidityPair, IToken, IWrappedLp};
use quad_client::mocks::{abi_ret, mock_client, MockChain, MOCK_ACCOUNT};
use quad_client::Role;

const QUAD: Address = address!("0000000000000000000000000000000000000001");
const WLP: Address = address!("0000000000000000000000000000000000000002");
const LP: Address = address!("0000000000000000000000000000000000000003");
const WETH: Address = address!("0000000000000000000000000000000000000004");

#[tokio::test]
async fn test_quad_balance_resolves_token_role_then_reads_balance() {
	let chain = Arc::new(
		MockChain::new()
			.on_role(Role::Token, vec![QUAD])
			.on_call(
				QUAD,
				IToken::balanceOfCall { owner: MOCK_ACCOUNT },
				abi_ret(U256::from(1_500_000_000_000_000_000u64)),
			),
	);
	let client = mock_client(chain);
	client.connect().await.unwrap();

	let balance = client.tokens().quad_balance().await;
	assert_eq!(balance.ready().map(String::as_str), Some("1.5"));
}

#[tokio::test]
async fn test_balance_with_disconnected_wallet_is_loading_indefinitely() {
	let chain = Arc::new(MockChain::disconnected().on_role(Role::Token, vec![QUAD]));
	let client = mock_client(chain);
	client.connect().await.unwrap();

	// No account: reads depending on one never leave the loading state
	for _ in 0..3 {
		assert!(client.tokens().token_balance(QUAD).await.is_loading());
		assert!(client.tokens().quad_balance().await.is_loading());
		assert!(client.tokens().eth_balance().await.is_loading());
	}
}

#[tokio::test]
async fn test_backing_chain_from_wrapper_to_pair_tokens() {
	let chain = Arc::new(
		MockChain::new()
			.on_role(Role::WrappedLp, vec![WLP])
			.on_call(WLP, IWrappedLp::_lpTokenCall {}, abi_ret(LP))
			.on_call(LP, ILiquidityPair::token0Call {}, abi_ret(QUAD))
			.on_call(LP, ILiquidityPair::token1Call {}, abi_ret(WETH))
			.on_call(WETH, IToken::symbolCall {}, abi_ret("WETH".to_string())),
	);
	let client = mock_client(chain);
	client.connect().await.unwrap();

	let wrappers = client.tokens().wlp_addresses().await;
	assert_eq!(wrappers.ready(), Some(&vec![WLP]));

	let lp = client.tokens().backing_lp(WLP).await;
	assert_eq!(lp.ready(), Some(&LP));

	let pair = client.tokens().backing_tokens(LP).await;
	let pair = pair.into_ready().expect("both sides answered");
	assert_eq!(pair.token0, QUAD);
	assert_eq!(pair.token1, WETH);
	assert_eq!(pair.counterpart(QUAD), Some(WETH));

	let symbol = client.tokens().token_symbol(WETH).await;
	assert_eq!(symbol.ready().map(String::as_str), Some("WETH"));
}

#[tokio::test]
async fn test_backing_pair_with_one_dead_side_never_reports_ready() {
	let chain = Arc::new(
		MockChain::new()
			.on_call(LP, ILiquidityPair::token0Call {}, abi_ret(QUAD))
			.on_call_revert(LP, ILiquidityPair::token1Call {}, "token1 reverted"),
	);
	let client = mock_client(chain);
	client.connect().await.unwrap();

	let pair = client.tokens().backing_tokens(LP).await;
	assert!(pair.is_failed());
	assert!(!pair.is_ready());
}

#[tokio::test]
async fn test_wlp_balances_covers_every_wrapper() {
	let other_wlp = address!("0000000000000000000000000000000000000005");
	let chain = Arc::new(
		MockChain::new()
			.on_role(Role::WrappedLp, vec![WLP, other_wlp])
			.on_call(
				WLP,
				IToken::balanceOfCall { owner: MOCK_ACCOUNT },
				abi_ret(U256::from(1_000_000_000_000_000_000u64)),
			)
			.on_call(
				other_wlp,
				IToken::balanceOfCall { owner: MOCK_ACCOUNT },
				abi_ret(U256::from(250_000_000_000_000_000u64)),
			),
	);
	let client = mock_client(chain);
	client.connect().await.unwrap();

	let balances = client.tokens().wlp_balances().await.into_ready().unwrap();
	assert_eq!(balances.len(), 2);
	assert_eq!(balances[&WLP], "1");
	assert_eq!(balances[&other_wlp], "0.25");
}

#[tokio::test]
async fn test_total_supply_normalization() {
	let chain = Arc::new(
		MockChain::new().on_role(Role::Token, vec![QUAD]).on_call(
			QUAD,
			IToken::totalSupplyCall {},
			abi_ret(U256::from(21_000_000u64) * quad_client::types::WEI_PER_TOKEN),
		),
	);
	let client = mock_client(chain);
	client.connect().await.unwrap();

	let supply = client.tokens().total_supply().await;
	assert_eq!(supply.ready().map(String::as_str), Some("21000000"));
}

#[tokio::test]
async fn test_token_name_read() {
	let chain = Arc::new(MockChain::new().on_call(
		QUAD,
		IToken::nameCall {},
		abi_ret("Quad Token".to_string()),
	));
	let client = mock_client(chain);
	client.connect().await.unwrap();

	let name = client.tokens().token_name(QUAD).await;
	assert_eq!(name.ready().map(String::as_str), Some("Quad Token"));
}
