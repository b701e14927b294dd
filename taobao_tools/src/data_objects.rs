use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::TaobaoApiError;

/// One trade record as returned by `taobao.trades.sold.get`.
///
/// The API is loose about types (`tid` and `payment` arrive as strings or numbers depending on the
/// endpoint version), so every field is deserialized leniently into an optional string. Anything
/// the sync engine cannot positively derive from these fields is left untouched on the local
/// order record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RemoteTrade {
    #[serde(default, deserialize_with = "stringified")]
    pub tid: Option<String>,
    #[serde(default, deserialize_with = "stringified")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "stringified")]
    pub payment: Option<String>,
    #[serde(default, deserialize_with = "stringified")]
    pub pay_time: Option<String>,
    #[serde(default, deserialize_with = "stringified")]
    pub seller_nick: Option<String>,
    #[serde(default, deserialize_with = "stringified")]
    pub buyer_message: Option<String>,
}

/// Accepts a JSON string, number or null and produces an optional string. Any other JSON type is
/// rendered as its JSON text, which downstream numeric parsing will reject with a proper error.
fn stringified<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where D: Deserializer<'de> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }))
}

/// The result of fetching one page of sold trades.
///
/// The Taobao API signals "your query window is exhausted" by returning the response envelope
/// *without* a trade list. That is a legitimate end-of-results marker and gets its own variant so
/// callers never confuse it with a malformed response (which is an error, see
/// [`TradePage::from_response`]).
#[derive(Debug, Clone)]
pub enum TradePage {
    Page { trades: Vec<RemoteTrade>, has_next: bool },
    Exhausted,
}

impl TradePage {
    /// Extracts a trade page from a raw `taobao.trades.sold.get` response body.
    ///
    /// A body without the `trades_sold_get_response` envelope is malformed and returns a
    /// `ProtocolError`. An envelope without a `trades.trade` list is the exhaustion marker.
    /// A single trade object (the API omits the array wrapper for single-record pages) is
    /// accepted and wrapped in a one-element page.
    pub fn from_response(body: &Value) -> Result<Self, TaobaoApiError> {
        let envelope = body
            .get("trades_sold_get_response")
            .ok_or_else(|| TaobaoApiError::ProtocolError(format!("missing trades_sold_get_response envelope: {body}")))?;
        let Some(trade) = envelope.pointer("/trades/trade") else {
            return Ok(TradePage::Exhausted);
        };
        let trades = match trade {
            Value::Array(_) => serde_json::from_value::<Vec<RemoteTrade>>(trade.clone())
                .map_err(|e| TaobaoApiError::JsonError(e.to_string()))?,
            single => vec![serde_json::from_value::<RemoteTrade>(single.clone())
                .map_err(|e| TaobaoApiError::JsonError(e.to_string()))?],
        };
        let has_next = envelope.get("has_next").and_then(Value::as_bool).unwrap_or(false);
        Ok(TradePage::Page { trades, has_next })
    }
}
