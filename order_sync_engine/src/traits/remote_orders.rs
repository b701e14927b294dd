use chrono::{DateTime, Utc};
use taobao_tools::{TaobaoApi, TaobaoApiError, TradePage};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RemoteSourceError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<TaobaoApiError> for RemoteSourceError {
    fn from(e: TaobaoApiError) -> Self {
        match e {
            TaobaoApiError::ProtocolError(msg) | TaobaoApiError::JsonError(msg) => RemoteSourceError::Protocol(msg),
            other => RemoteSourceError::Transport(other.to_string()),
        }
    }
}

/// The marketplace side of the reconciliation loop: fetch one page of trade records created
/// inside the window.
///
/// Pagination is stateful on the remote side, so callers must request pages sequentially in
/// increasing order. Either failure variant terminates the current sync run without being raised
/// to the caller; retries are a client concern, not a loop concern.
#[allow(async_fn_in_trait)]
pub trait RemoteOrderSource {
    async fn fetch_orders_page(
        &self,
        session: &str,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        page_no: u32,
        page_size: u32,
    ) -> Result<TradePage, RemoteSourceError>;
}

impl RemoteOrderSource for TaobaoApi {
    async fn fetch_orders_page(
        &self,
        session: &str,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        page_no: u32,
        page_size: u32,
    ) -> Result<TradePage, RemoteSourceError> {
        let page = self.get_orders(session, window_start, window_end, page_no, page_size).await?;
        Ok(page)
    }
}
