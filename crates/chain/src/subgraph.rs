//! GraphQL price-feed client
//!
//! Queries the exchange subgraph for the ETH/USD price and per-token derived
//! prices. The feed is read-only and stateless; failures propagate to the
//! caller.

use alloy_primitives::Address;
use quad_config::SubgraphSettings;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use url::Url;

use quad_types::{SubgraphError, SubgraphResult};

const ETH_PRICE_QUERY: &str = r#"query ethPrice { bundle(id: "1") { ethPrice } }"#;

const TOKEN_PRICE_QUERY: &str = r#"query tokens($tokenAddress: Bytes!) {
	tokens(where: { id: $tokenAddress }) { derivedETH }
}"#;

#[derive(Debug)]
pub struct SubgraphClient {
	client: reqwest::Client,
	endpoint: Url,
}

impl SubgraphClient {
	pub fn new(settings: &SubgraphSettings) -> SubgraphResult<Self> {
		let endpoint = Url::parse(&settings.endpoint)
			.map_err(|err| SubgraphError::InvalidEndpoint(format!("{}: {err}", settings.endpoint)))?;

		Ok(Self {
			client: reqwest::Client::new(),
			endpoint,
		})
	}

	/// Current ETH price in USD.
	pub async fn eth_price(&self) -> SubgraphResult<f64> {
		let payload: BundlePayload = self.query(ETH_PRICE_QUERY, json!({})).await?;
		let bundle = payload
			.bundle
			.ok_or_else(|| SubgraphError::Malformed("missing bundle".to_string()))?;

		bundle
			.eth_price
			.parse()
			.map_err(|_| SubgraphError::Malformed(format!("bad ethPrice: {}", bundle.eth_price)))
	}

	/// Price of a token in ETH as derived by the exchange, or `None` for a
	/// token the exchange does not list.
	pub async fn token_derived_eth(&self, token: Address) -> SubgraphResult<Option<f64>> {
		let variables = json!({ "tokenAddress": token.to_string().to_lowercase() });
		let payload: TokensPayload = self.query(TOKEN_PRICE_QUERY, variables).await?;

		let Some(entry) = payload.tokens.into_iter().next() else {
			return Ok(None);
		};
		entry
			.derived_eth
			.parse()
			.map(Some)
			.map_err(|_| SubgraphError::Malformed(format!("bad derivedETH: {}", entry.derived_eth)))
	}

	async fn query<T: serde::de::DeserializeOwned>(
		&self,
		query: &str,
		variables: serde_json::Value,
	) -> SubgraphResult<T> {
		debug!(endpoint = %self.endpoint, "subgraph query");
		let response = self
			.client
			.post(self.endpoint.clone())
			.json(&json!({ "query": query, "variables": variables }))
			.send()
			.await?;

		let envelope: GraphQlResponse<T> = response.error_for_status()?.json().await?;

		if let Some(errors) = envelope.errors {
			let joined = errors
				.into_iter()
				.map(|e| e.message)
				.collect::<Vec<_>>()
				.join("; ");
			return Err(SubgraphError::Query(joined));
		}
		envelope
			.data
			.ok_or_else(|| SubgraphError::Malformed("missing data".to_string()))
	}
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
	data: Option<T>,
	errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
	message: String,
}

#[derive(Debug, Deserialize)]
struct BundlePayload {
	bundle: Option<Bundle>,
}

#[derive(Debug, Deserialize)]
struct Bundle {
	#[serde(rename = "ethPrice")]
	eth_price: String,
}

#[derive(Debug, Deserialize)]
struct TokensPayload {
	tokens: Vec<TokenEntry>,
}

#[derive(Debug, Deserialize)]
struct TokenEntry {
	#[serde(rename = "derivedETH")]
	derived_eth: String,
}
