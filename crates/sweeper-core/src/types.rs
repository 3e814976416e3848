use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::WireError;

/// Status literal the execute endpoint returns for a landed swap
pub const STATUS_SUCCESS: &str = "Success";

/// Holding of a single mint as reported by the balances endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    /// Raw amount in base units, kept as the decimal string the API sent
    pub amount: String,
    #[serde(default)]
    pub ui_amount: Option<f64>,
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default)]
    pub is_frozen: Option<bool>,
}

impl TokenBalance {
    pub fn new(amount: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            ui_amount: None,
            slot: None,
            is_frozen: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceEntry {
    pub mint: String,
    pub balance: TokenBalance,
}

impl BalanceEntry {
    pub fn new(mint: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            mint: mint.into(),
            balance: TokenBalance::new(amount),
        }
    }
}

/// Balances response: a JSON object keyed by mint.
///
/// Entries are kept in the order the object listed them, one per mint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSheet(pub Vec<BalanceEntry>);

impl BalanceSheet {
    pub fn into_entries(self) -> Vec<BalanceEntry> {
        self.0
    }
}

impl<'de> Deserialize<'de> for BalanceSheet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SheetVisitor;

        impl<'de> Visitor<'de> for SheetVisitor {
            type Value = BalanceSheet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of mint to balance")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<BalanceEntry> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((mint, balance)) = map.next_entry::<String, TokenBalance>()? {
                    // a repeated key keeps its first position and its last value
                    match entries.iter_mut().find(|e| e.mint == mint) {
                        Some(existing) => existing.balance = balance,
                        None => entries.push(BalanceEntry { mint, balance }),
                    }
                }
                Ok(BalanceSheet(entries))
            }
        }

        deserializer.deserialize_map(SheetVisitor)
    }
}

/// Query parameters of `GET /order`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub input_mint: String,
    pub output_mint: String,
    pub amount: String,
    pub taker: String,
}

/// Raw `GET /order` body. `transaction` is null when the service could not
/// build a swap for the taker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(default)]
    pub transaction: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub in_amount: Option<String>,
    #[serde(default)]
    pub out_amount: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl OrderResponse {
    pub fn into_result(self) -> Result<OrderResult, WireError> {
        let request_id = self.request_id.ok_or(WireError::MissingField("requestId"))?;
        match self.transaction {
            Some(transaction) if !transaction.is_empty() => Ok(OrderResult {
                transaction,
                request_id,
            }),
            _ => Err(WireError::NoTransaction(
                self.error_message
                    .unwrap_or_else(|| "order returned no transaction".to_string()),
            )),
        }
    }
}

/// Unsigned transaction and the id tying it to its execution
#[derive(Debug, Clone, PartialEq)]
pub struct OrderResult {
    /// base64 bincode-encoded versioned transaction
    pub transaction: String,
    pub request_id: String,
}

/// Body of `POST /execute`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteRequest {
    pub signed_transaction: String,
    pub request_id: String,
}

/// Verdict returned by `POST /execute`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

// The execute endpoint sends `code` as a number; older responses used strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number for code, got {}",
            other
        ))),
    }
}
