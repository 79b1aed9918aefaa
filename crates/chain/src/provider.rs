//! JSON-RPC 2.0 provider over HTTP

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use quad_config::RpcSettings;
use quad_types::{ChainError, ChainResult, Provider, TransactionRequest, TxReceipt};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

/// Provider implementation speaking JSON-RPC 2.0 to a wallet/node endpoint.
///
/// Transaction submission relies on the endpoint's managed accounts
/// (`eth_sendTransaction`) and polls for the receipt on a fixed interval
/// until it exists or the configured timeout elapses.
#[derive(Debug)]
pub struct HttpProvider {
	client: reqwest::Client,
	endpoint: Url,
	next_id: AtomicU64,
	receipt_poll_interval: Duration,
	receipt_timeout_ms: u64,
}

impl HttpProvider {
	pub fn new(settings: &RpcSettings) -> ChainResult<Self> {
		let endpoint = Url::parse(&settings.endpoint)
			.map_err(|err| ChainError::InvalidEndpoint(format!("{}: {err}", settings.endpoint)))?;

		let client = reqwest::Client::builder()
			.timeout(Duration::from_millis(settings.request_timeout_ms))
			.build()?;

		Ok(Self {
			client,
			endpoint,
			next_id: AtomicU64::new(1),
			receipt_poll_interval: Duration::from_millis(settings.receipt_poll_interval_ms),
			receipt_timeout_ms: settings.receipt_timeout_ms,
		})
	}

	async fn request<R: DeserializeOwned>(
		&self,
		method: &'static str,
		params: Value,
	) -> ChainResult<R> {
		self.request_nullable(method, params)
			.await?
			.ok_or_else(|| ChainError::InvalidResponse(format!("{method}: missing result")))
	}

	/// Like [`request`](Self::request) but treats a `null` result as `None`
	/// (e.g. a receipt that does not exist yet).
	async fn request_nullable<R: DeserializeOwned>(
		&self,
		method: &'static str,
		params: Value,
	) -> ChainResult<Option<R>> {
		let id = self.next_id.fetch_add(1, Ordering::Relaxed);
		let body = json!({
			"jsonrpc": "2.0",
			"id": id,
			"method": method,
			"params": params,
		});

		debug!(method, id, "rpc request");
		let response = self
			.client
			.post(self.endpoint.clone())
			.json(&body)
			.send()
			.await?;
		let envelope: RpcEnvelope<R> = response.error_for_status()?.json().await?;

		if let Some(err) = envelope.error {
			return Err(ChainError::Rpc {
				code: err.code,
				message: err.message,
			});
		}
		Ok(envelope.result)
	}
}

#[async_trait]
impl Provider for HttpProvider {
	async fn call(&self, to: Address, data: Bytes) -> ChainResult<Bytes> {
		self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
			.await
	}

	async fn get_balance(&self, address: Address) -> ChainResult<U256> {
		let quantity: String = self
			.request("eth_getBalance", json!([address, "latest"]))
			.await?;
		parse_quantity(&quantity)
	}

	async fn send_transaction(&self, tx: TransactionRequest) -> ChainResult<TxReceipt> {
		let mut tx_object = json!({
			"from": tx.from,
			"to": tx.to,
			"data": tx.data,
		});
		if let Some(value) = tx.value {
			tx_object["value"] = Value::String(to_quantity(value));
		}

		let hash: B256 = self.request("eth_sendTransaction", json!([tx_object])).await?;
		info!(%hash, "transaction submitted, waiting for receipt");

		let started = Instant::now();
		loop {
			let receipt: Option<RawReceipt> = self
				.request_nullable("eth_getTransactionReceipt", json!([hash]))
				.await?;
			if let Some(raw) = receipt {
				return raw.into_receipt();
			}

			if started.elapsed() >= Duration::from_millis(self.receipt_timeout_ms) {
				return Err(ChainError::ReceiptTimeout {
					tx_hash: hash,
					timeout_ms: self.receipt_timeout_ms,
				});
			}
			tokio::time::sleep(self.receipt_poll_interval).await;
		}
	}

	async fn chain_id(&self) -> ChainResult<u64> {
		let quantity: String = self.request("eth_chainId", json!([])).await?;
		parse_u64_quantity(&quantity)
	}

	async fn accounts(&self) -> ChainResult<Vec<Address>> {
		self.request("eth_accounts", json!([])).await
	}
}

#[derive(Debug, Deserialize)]
struct RpcEnvelope<R> {
	result: Option<R>,
	error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
	code: i64,
	message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReceipt {
	transaction_hash: B256,
	block_number: Option<String>,
	status: Option<String>,
	gas_used: Option<String>,
}

impl RawReceipt {
	fn into_receipt(self) -> ChainResult<TxReceipt> {
		let block_number = self
			.block_number
			.as_deref()
			.map(parse_u64_quantity)
			.transpose()?;
		let gas_used = self.gas_used.as_deref().map(parse_u64_quantity).transpose()?;
		// Receipts without a status field predate status reporting
		let status = match self.status.as_deref() {
			Some(text) => !parse_quantity(text)?.is_zero(),
			None => true,
		};

		Ok(TxReceipt {
			transaction_hash: self.transaction_hash,
			block_number,
			status,
			gas_used,
		})
	}
}

/// Parse a JSON-RPC hex quantity ("0x1a") into a 256-bit integer.
fn parse_quantity(text: &str) -> ChainResult<U256> {
	let digits = text.strip_prefix("0x").unwrap_or(text);
	U256::from_str_radix(digits, 16)
		.map_err(|_| ChainError::InvalidResponse(format!("bad quantity: {text}")))
}

fn parse_u64_quantity(text: &str) -> ChainResult<u64> {
	let value = parse_quantity(text)?;
	u64::try_from(value).map_err(|_| ChainError::InvalidResponse(format!("quantity too large: {text}")))
}

/// Minimal hex encoding for quantities, as the wire format requires.
fn to_quantity(value: U256) -> String {
	format!("{value:#x}")
}
