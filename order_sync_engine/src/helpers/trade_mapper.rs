//! The trade mapper: translates one remote Taobao trade record into the internal order
//! representation.
//!
//! The mapper is a pure function. It emits a *sparse* update payload carrying only the fields it
//! can positively derive from the remote record, which is what makes repeated sync runs safe to
//! interleave with fulfilment operations that write the other fields.
use chrono::{NaiveDateTime, TimeZone, Utc};
use taobao_tools::{RemoteTrade, TAOBAO_TIMESTAMP_FORMAT};
use thiserror::Error;

use crate::db_types::{OrderNumber, OrderStatus, OrderUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeMapError {
    #[error("Trade record is missing the required tid field")]
    MissingKey,
    #[error("Could not parse pay_time '{0}': {1}")]
    TimestampParse(String, String),
    #[error("Could not parse payment amount '{0}'")]
    InvalidAmount(String),
}

/// The result of mapping one trade: the resolved reconciliation key plus the sparse update
/// payload to apply under it.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedTrade {
    pub order_number: OrderNumber,
    pub update: OrderUpdate,
}

/// Maps a Taobao trade status code onto the internal vocabulary. Codes outside the table pass
/// through as [`OrderStatus::Unmapped`] so future remote statuses stay visible.
pub fn map_status(code: &str) -> OrderStatus {
    match code {
        "WAIT_SELLER_SEND_GOODS" => OrderStatus::AwaitingShipment,
        "TRADE_CLOSED" | "TRADE_CLOSED_BY_TAOBAO" => OrderStatus::Closed,
        "TRADE_FINISHED" => OrderStatus::Success,
        "WAIT_BUYER_CONFIRM_GOODS" => OrderStatus::Shipped,
        other => OrderStatus::Unmapped(other.to_string()),
    }
}

/// Translates one remote trade into a [`MappedTrade`].
///
/// Field rules:
/// * `order_number` is the `tid` in string form. A missing or empty `tid` fails the record.
/// * `shop_id` and `remark` default to the empty string when absent; they are always written.
/// * `price` is the payment amount coerced to a float; absent means zero, present but
///   non-numeric fails the record.
/// * `payment_time` is parsed with the platform timestamp format; absent maps to absent.
/// * `status` is only emitted when the remote record carries one.
pub fn map_trade(trade: &RemoteTrade) -> Result<MappedTrade, TradeMapError> {
    let tid = trade.tid.as_deref().map(str::trim).filter(|t| !t.is_empty()).ok_or(TradeMapError::MissingKey)?;
    let order_number = OrderNumber::from(tid);
    let price = match trade.payment.as_deref() {
        None => 0.0,
        Some(raw) => raw.trim().parse::<f64>().map_err(|_| TradeMapError::InvalidAmount(raw.to_string()))?,
    };
    let mut update = OrderUpdate::default()
        .with_shop_id(trade.seller_nick.clone().unwrap_or_default())
        .with_price(price)
        .with_remark(trade.buyer_message.clone().unwrap_or_default());
    if let Some(code) = trade.status.as_deref() {
        update = update.with_status(map_status(code));
    }
    if let Some(raw) = trade.pay_time.as_deref() {
        let naive = NaiveDateTime::parse_from_str(raw, TAOBAO_TIMESTAMP_FORMAT)
            .map_err(|e| TradeMapError::TimestampParse(raw.to_string(), e.to_string()))?;
        update = update.with_payment_time(Utc.from_utc_datetime(&naive));
    }
    Ok(MappedTrade { order_number, update })
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Timelike;

    fn trade(tid: Option<&str>) -> RemoteTrade {
        RemoteTrade { tid: tid.map(String::from), ..RemoteTrade::default() }
    }

    #[test]
    fn full_trade_maps_every_field() {
        let remote = RemoteTrade {
            tid: Some("100".to_string()),
            status: Some("WAIT_SELLER_SEND_GOODS".to_string()),
            payment: Some("12.50".to_string()),
            pay_time: Some("2024-03-01 08:30:00".to_string()),
            seller_nick: Some("shopA".to_string()),
            buyer_message: Some("leave at the door".to_string()),
        };
        let mapped = map_trade(&remote).unwrap();
        assert_eq!(mapped.order_number.as_str(), "100");
        assert_eq!(mapped.update.shop_id.as_deref(), Some("shopA"));
        assert_eq!(mapped.update.price, Some(12.5));
        assert_eq!(mapped.update.status, Some(OrderStatus::AwaitingShipment));
        assert_eq!(mapped.update.remark.as_deref(), Some("leave at the door"));
        assert_eq!(mapped.update.payment_time.unwrap().hour(), 8);
    }

    #[test]
    fn missing_tid_fails_the_record() {
        assert_eq!(map_trade(&trade(None)), Err(TradeMapError::MissingKey));
        assert_eq!(map_trade(&trade(Some(""))), Err(TradeMapError::MissingKey));
        assert_eq!(map_trade(&trade(Some("  "))), Err(TradeMapError::MissingKey));
    }

    #[test]
    fn unknown_status_passes_through() {
        let mut remote = trade(Some("100"));
        remote.status = Some("SOME_FUTURE_CODE".to_string());
        let mapped = map_trade(&remote).unwrap();
        assert_eq!(mapped.update.status, Some(OrderStatus::Unmapped("SOME_FUTURE_CODE".to_string())));
    }

    #[test]
    fn status_table() {
        assert_eq!(map_status("WAIT_SELLER_SEND_GOODS"), OrderStatus::AwaitingShipment);
        assert_eq!(map_status("TRADE_CLOSED"), OrderStatus::Closed);
        assert_eq!(map_status("TRADE_CLOSED_BY_TAOBAO"), OrderStatus::Closed);
        assert_eq!(map_status("TRADE_FINISHED"), OrderStatus::Success);
        assert_eq!(map_status("WAIT_BUYER_CONFIRM_GOODS"), OrderStatus::Shipped);
    }

    #[test]
    fn absent_status_is_not_emitted() {
        let mapped = map_trade(&trade(Some("100"))).unwrap();
        assert_eq!(mapped.update.status, None);
    }

    #[test]
    fn absent_payment_defaults_to_zero() {
        let mapped = map_trade(&trade(Some("100"))).unwrap();
        assert_eq!(mapped.update.price, Some(0.0));
    }

    #[test]
    fn non_numeric_payment_fails_the_record() {
        let mut remote = trade(Some("100"));
        remote.payment = Some("twelve fifty".to_string());
        assert_eq!(map_trade(&remote), Err(TradeMapError::InvalidAmount("twelve fifty".to_string())));
    }

    #[test]
    fn malformed_pay_time_fails_the_record() {
        let mut remote = trade(Some("100"));
        remote.pay_time = Some("01/03/2024".to_string());
        assert!(matches!(map_trade(&remote), Err(TradeMapError::TimestampParse(_, _))));
    }

    #[test]
    fn absent_pay_time_maps_to_absent() {
        let mapped = map_trade(&trade(Some("100"))).unwrap();
        assert_eq!(mapped.update.payment_time, None);
    }

    #[test]
    fn absent_seller_and_message_default_to_empty_strings() {
        let mapped = map_trade(&trade(Some("100"))).unwrap();
        assert_eq!(mapped.update.shop_id.as_deref(), Some(""));
        assert_eq!(mapped.update.remark.as_deref(), Some(""));
    }
}
