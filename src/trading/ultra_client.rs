/// Jupiter Ultra API client
///
/// Wraps the three endpoints a sweep needs: wallet balances, order creation
/// and execution of a signed order.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Response,
};
use serde_json::Value;
use tokio::time::Duration;
use tracing::{debug, instrument};

use sweeper_core::{
    BalanceEntry, BalanceSheet, ExecuteRequest, ExecutionResult, OrderRequest, OrderResponse,
    OrderResult,
};

use crate::config::SweepConfig;
use crate::core::{ApiFailure, SweepError};

/// Remote swap service consumed by the sweeper
#[async_trait]
pub trait UltraApi: Send + Sync {
    async fn balances(&self, owner: &str) -> Result<Vec<BalanceEntry>, SweepError>;

    async fn order(&self, request: &OrderRequest) -> Result<OrderResult, SweepError>;

    /// `mint` only labels the error; it is not sent
    async fn execute(
        &self,
        mint: &str,
        request: &ExecuteRequest,
    ) -> Result<ExecutionResult, SweepError>;
}

pub struct UltraClient {
    client: Client,
    api_url: String,
}

impl UltraClient {
    pub fn new(config: &SweepConfig) -> Result<Self, SweepError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SweepError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Error body as JSON when the service sent one, status text otherwise
async fn failure_from(response: Response) -> ApiFailure {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Null) | Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        Ok(value) => value.to_string(),
    };
    ApiFailure {
        status: Some(status.as_u16()),
        detail,
    }
}

#[async_trait]
impl UltraApi for UltraClient {
    #[instrument(skip(self))]
    async fn balances(&self, owner: &str) -> Result<Vec<BalanceEntry>, SweepError> {
        let url = format!("{}/balances/{}", self.api_url, owner);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SweepError::Balances(ApiFailure::transport(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SweepError::Balances(failure_from(response).await));
        }

        let sheet: BalanceSheet = response.json().await.map_err(|e| {
            SweepError::Balances(ApiFailure::body(status.as_u16(), format!(
                "failed to parse balances response: {}",
                e
            )))
        })?;

        debug!(count = sheet.0.len(), "📊 Balances received");
        Ok(sheet.into_entries())
    }

    #[instrument(skip(self), fields(input_mint = %request.input_mint))]
    async fn order(&self, request: &OrderRequest) -> Result<OrderResult, SweepError> {
        let url = format!("{}/order", self.api_url);
        let mint = request.input_mint.as_str();
        let order_failure = |failure| SweepError::Order {
            mint: mint.to_string(),
            failure,
        };

        let response = self
            .client
            .get(&url)
            .query(request)
            .send()
            .await
            .map_err(|e| order_failure(ApiFailure::transport(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(order_failure(failure_from(response).await));
        }

        let order: OrderResponse = response.json().await.map_err(|e| {
            order_failure(ApiFailure::body(status.as_u16(), format!(
                "failed to parse order response: {}",
                e
            )))
        })?;

        debug!(
            in_amount = ?order.in_amount,
            out_amount = ?order.out_amount,
            "📥 Order received"
        );
        order
            .into_result()
            .map_err(|e| SweepError::order(mint, status.as_u16(), e))
    }

    #[instrument(skip(self, request), fields(request_id = %request.request_id))]
    async fn execute(
        &self,
        mint: &str,
        request: &ExecuteRequest,
    ) -> Result<ExecutionResult, SweepError> {
        let url = format!("{}/execute", self.api_url);
        let execution_failure = |failure| SweepError::Execution {
            mint: mint.to_string(),
            failure,
        };

        debug!("📤 Submitting signed transaction");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| execution_failure(ApiFailure::transport(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(execution_failure(failure_from(response).await));
        }

        response.json::<ExecutionResult>().await.map_err(|e| {
            execution_failure(ApiFailure::body(status.as_u16(), format!(
                "failed to parse execute response: {}",
                e
            )))
        })
    }
}
