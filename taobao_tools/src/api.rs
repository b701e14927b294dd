use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::*;
use reqwest::Client;
use serde_json::Value;

use crate::{
    config::TaobaoConfig,
    data_objects::TradePage,
    helpers::{sign_params, TAOBAO_TIMESTAMP_FORMAT},
    TaobaoApiError,
};

const TRADES_SOLD_GET: &str = "taobao.trades.sold.get";
const TRADE_FULLINFO_GET: &str = "taobao.trade.fullinfo.get";

const TRADE_FIELDS: &str = "tid,title,type,status,payment,discount_fee,adjust_fee,post_fee,total_fee,pay_time,\
                            end_time,created,seller_nick,buyer_nick,buyer_message,receiver_name,receiver_state,\
                            receiver_city,receiver_district,receiver_address,receiver_zip,receiver_mobile,\
                            receiver_phone";

/// A client for the Taobao Open Platform REST gateway.
///
/// Every request carries the common platform parameters (app key, format, version, timestamp) and
/// an HMAC-MD5 signature over the full, sorted parameter set. The session token identifying the
/// seller is passed per call, not stored on the client.
#[derive(Clone)]
pub struct TaobaoApi {
    config: TaobaoConfig,
    client: Arc<Client>,
}

impl TaobaoApi {
    pub fn new(config: TaobaoConfig) -> Result<Self, TaobaoApiError> {
        let client = Client::builder().build().map_err(|e| TaobaoApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Executes a raw API call. The signature is computed over the merged common and
    /// method-specific parameters, then appended as the `sign` parameter.
    pub async fn execute(
        &self,
        method: &str,
        params: &[(String, String)],
        session: Option<&str>,
    ) -> Result<Value, TaobaoApiError> {
        let mut all_params: Vec<(String, String)> = vec![
            ("app_key".into(), self.config.app_key.clone()),
            ("method".into(), method.into()),
            ("format".into(), "json".into()),
            ("v".into(), "2.0".into()),
            ("sign_method".into(), "hmac".into()),
            ("timestamp".into(), Utc::now().format(TAOBAO_TIMESTAMP_FORMAT).to_string()),
        ];
        if let Some(session) = session {
            all_params.push(("session".into(), session.into()));
        }
        all_params.extend_from_slice(params);
        let sign = sign_params(self.config.app_secret.reveal(), &all_params);
        all_params.push(("sign".into(), sign));
        trace!("Sending {method} request to {}", self.config.api_url);
        let response = self
            .client
            .post(&self.config.api_url)
            .form(&all_params)
            .send()
            .await
            .map_err(|e| TaobaoApiError::RequestError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| TaobaoApiError::RequestError(e.to_string()))?;
            return Err(TaobaoApiError::QueryError { status, message });
        }
        let body = response.json::<Value>().await.map_err(|e| TaobaoApiError::JsonError(e.to_string()))?;
        if let Some(err) = body.get("error_response") {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
            let msg = err.get("msg").and_then(Value::as_str).unwrap_or("unknown error").to_string();
            return Err(TaobaoApiError::ApiError { code, msg });
        }
        trace!("{method} response: {body}");
        Ok(body)
    }

    /// Fetches one page of sold trades created inside the given window.
    ///
    /// Windows bounds are inclusive and formatted with [`TAOBAO_TIMESTAMP_FORMAT`]. Pages must be
    /// requested in increasing order; the gateway is stateful about pagination position.
    pub async fn get_orders(
        &self,
        session: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        page_no: u32,
        page_size: u32,
    ) -> Result<TradePage, TaobaoApiError> {
        let params = vec![
            ("fields".to_string(), TRADE_FIELDS.to_string()),
            ("start_created".to_string(), start.format(TAOBAO_TIMESTAMP_FORMAT).to_string()),
            ("end_created".to_string(), end.format(TAOBAO_TIMESTAMP_FORMAT).to_string()),
            ("page_no".to_string(), page_no.to_string()),
            ("page_size".to_string(), page_size.to_string()),
            ("use_has_next".to_string(), "true".to_string()),
        ];
        debug!("Fetching sold trades page {page_no} (page size {page_size})");
        let body = self.execute(TRADES_SOLD_GET, &params, Some(session)).await?;
        let page = TradePage::from_response(&body)?;
        if let TradePage::Page { trades, has_next } = &page {
            info!("Fetched {} trades on page {page_no}. More pages: {has_next}", trades.len());
        }
        Ok(page)
    }

    /// Fetches the full detail record for a single trade. Returns the raw trade object.
    pub async fn get_order_detail(&self, session: &str, tid: &str) -> Result<Value, TaobaoApiError> {
        let fields = format!(
            "{TRADE_FIELDS},orders.title,orders.price,orders.num,orders.total_fee,orders.payment,orders.status,\
             orders.sku_properties_name,orders.refund_status,orders.outer_iid,orders.outer_sku_id"
        );
        let params = vec![("fields".to_string(), fields), ("tid".to_string(), tid.to_string())];
        debug!("Fetching full trade info for {tid}");
        let body = self.execute(TRADE_FULLINFO_GET, &params, Some(session)).await?;
        body.get("trade_fullinfo_get_response")
            .and_then(|r| r.get("trade"))
            .cloned()
            .ok_or_else(|| TaobaoApiError::ProtocolError(format!("missing trade_fullinfo_get_response envelope: {body}")))
    }
}
