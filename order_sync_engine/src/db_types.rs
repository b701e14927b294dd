use std::{convert::Infallible, fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------    OrderNumber     ---------------------------------------------------------
/// The natural key bridging the two systems: the Taobao `tid` in string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderNumber(pub String);

impl FromStr for OrderNumber {
    type Err = Infallible;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderNumber {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl OrderNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

//--------------------------------------    OrderStatus     ---------------------------------------------------------
/// The internal order status vocabulary.
///
/// Known Taobao trade codes are mapped onto the closed variants. A code outside the mapping table
/// is carried verbatim in [`OrderStatus::Unmapped`] so that new remote statuses remain visible
/// instead of being silently dropped; consumers can match on the variant to tell known state from
/// passthrough values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    AwaitingShipment,
    Closed,
    Success,
    PartialRefund,
    Shipped,
    Unmapped(String),
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::AwaitingShipment => write!(f, "AwaitingShipment"),
            OrderStatus::Closed => write!(f, "Closed"),
            OrderStatus::Success => write!(f, "Success"),
            OrderStatus::PartialRefund => write!(f, "PartialRefund"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Unmapped(code) => write!(f, "{code}"),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        match s {
            "AwaitingShipment" => Self::AwaitingShipment,
            "Closed" => Self::Closed,
            "Success" => Self::Success,
            "PartialRefund" => Self::PartialRefund,
            "Shipped" => Self::Shipped,
            code => Self::Unmapped(code.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

//--------------------------------------    AuditStatus     ---------------------------------------------------------
/// Settlement audit state. Maintained by back-office operations, never written by the sync engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Type, Serialize, Deserialize)]
pub enum AuditStatus {
    #[default]
    Unaudited,
    Audited,
    Settled,
    Unsettled,
}

impl Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditStatus::Unaudited => write!(f, "Unaudited"),
            AuditStatus::Audited => write!(f, "Audited"),
            AuditStatus::Settled => write!(f, "Settled"),
            AuditStatus::Unsettled => write!(f, "Unsettled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid audit status: {0}")]
pub struct ConversionError(String);

impl FromStr for AuditStatus {
    type Err = ConversionError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unaudited" => Ok(Self::Unaudited),
            "Audited" => Ok(Self::Audited),
            "Settled" => Ok(Self::Settled),
            "Unsettled" => Ok(Self::Unsettled),
            s => Err(ConversionError(s.to_string())),
        }
    }
}

//--------------------------------------       Order        ---------------------------------------------------------
/// A durable order record.
///
/// Lifecycle timestamps other than `payment_time`, the audit status and the user assignment are
/// written by fulfilment operations outside the sync engine. The engine's partial updates leave
/// them untouched.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: OrderNumber,
    pub shop_id: String,
    pub price: f64,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub audit_status: AuditStatus,
    pub remark: String,
    pub payment_time: Option<DateTime<Utc>>,
    pub shipping_time: Option<DateTime<Utc>>,
    pub closing_time: Option<DateTime<Utc>>,
    pub confirmation_time: Option<DateTime<Utc>>,
    pub settlement_time: Option<DateTime<Utc>>,
    pub assigned_user: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewOrder      ---------------------------------------------------------
/// Insert payload for an order observed for the first time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub shop_id: String,
    pub price: f64,
    pub status: OrderStatus,
    pub payment_time: Option<DateTime<Utc>>,
    pub remark: String,
}

impl NewOrder {
    pub fn new(order_number: OrderNumber, shop_id: String, price: f64, status: OrderStatus) -> Self {
        Self { order_number, shop_id, price, status, payment_time: None, remark: String::new() }
    }

    /// Builds an insert payload from a partial-update payload, filling the fields the update does
    /// not carry with their storage defaults. A trade without any status is stored with an empty
    /// unmapped code.
    pub fn from_update(order_number: OrderNumber, update: &OrderUpdate) -> Self {
        Self {
            order_number,
            shop_id: update.shop_id.clone().unwrap_or_default(),
            price: update.price.unwrap_or_default(),
            status: update.status.clone().unwrap_or_else(|| OrderStatus::Unmapped(String::new())),
            payment_time: update.payment_time,
            remark: update.remark.clone().unwrap_or_default(),
        }
    }
}

//--------------------------------------     OrderUpdate    ---------------------------------------------------------
/// A sparse set of order fields: only fields that are `Some` are written by an update.
///
/// Presence is the only signal. There are no sentinel values, so a real zero price or empty remark
/// can be written without being confused with "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub shop_id: Option<String>,
    pub price: Option<f64>,
    pub status: Option<OrderStatus>,
    pub payment_time: Option<DateTime<Utc>>,
    pub remark: Option<String>,
}

impl OrderUpdate {
    pub fn with_shop_id<S: Into<String>>(mut self, shop_id: S) -> Self {
        self.shop_id = Some(shop_id.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_payment_time(mut self, payment_time: DateTime<Utc>) -> Self {
        self.payment_time = Some(payment_time);
        self
    }

    pub fn with_remark<S: Into<String>>(mut self, remark: S) -> Self {
        self.remark = Some(remark.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.shop_id.is_none()
            && self.price.is_none()
            && self.status.is_none()
            && self.payment_time.is_none()
            && self.remark.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_statuses_round_trip() {
        for status in [
            OrderStatus::AwaitingShipment,
            OrderStatus::Closed,
            OrderStatus::Success,
            OrderStatus::PartialRefund,
            OrderStatus::Shipped,
        ] {
            assert_eq!(OrderStatus::from(status.to_string()), status);
        }
    }

    #[test]
    fn unknown_statuses_round_trip_through_unmapped() {
        let status = OrderStatus::from("SOME_FUTURE_CODE");
        assert_eq!(status, OrderStatus::Unmapped("SOME_FUTURE_CODE".to_string()));
        assert_eq!(status.to_string(), "SOME_FUTURE_CODE");
    }

    #[test]
    fn status_converts_from_owned_strings_for_row_decoding() {
        // Row decoding goes through TryFrom<String>, supplied by the blanket impl over
        // From<String>; the conversion is infallible.
        let status = OrderStatus::try_from("Closed".to_string()).unwrap();
        assert_eq!(status, OrderStatus::Closed);
        let status = OrderStatus::try_from("SOME_FUTURE_CODE".to_string()).unwrap();
        assert_eq!(status, OrderStatus::Unmapped("SOME_FUTURE_CODE".to_string()));
    }

    #[test]
    fn update_presence_semantics() {
        let update = OrderUpdate::default();
        assert!(update.is_empty());
        // A real zero price is present, not "unchanged"
        let update = update.with_price(0.0);
        assert!(!update.is_empty());
        assert_eq!(update.price, Some(0.0));
        assert_eq!(update.status, None);
    }

    #[test]
    fn new_order_from_sparse_update_uses_storage_defaults() {
        let update = OrderUpdate::default().with_price(12.5);
        let order = NewOrder::from_update(OrderNumber::from("100"), &update);
        assert_eq!(order.shop_id, "");
        assert_eq!(order.price, 12.5);
        assert_eq!(order.status, OrderStatus::Unmapped(String::new()));
        assert_eq!(order.payment_time, None);
    }
}
