use std::fmt::Debug;

use chrono::{Duration, Utc};
use log::*;
use taobao_tools::TradePage;

use crate::{
    db_types::{NewOrder, Order},
    helpers::{map_trade, MappedTrade},
    sync_api::{
        errors::SyncApiError,
        sync_objects::{SyncParams, SyncResult},
    },
    traits::{OrderDatabaseError, OrderManagement, RemoteOrderSource},
};

/// `OrderSyncApi` drives the reconciliation of remote marketplace trades into the local order
/// store.
pub struct OrderSyncApi<B, S> {
    db: B,
    source: S,
}

impl<B, S> Debug for OrderSyncApi<B, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderSyncApi")
    }
}

impl<B, S> OrderSyncApi<B, S> {
    pub fn new(db: B, source: S) -> Self {
        Self { db, source }
    }
}

impl<B, S> OrderSyncApi<B, S>
where
    B: OrderManagement,
    S: RemoteOrderSource,
{
    /// Runs one synchronization pass over the trades created in the last `params.days` days.
    ///
    /// The loop requests pages sequentially, maps every trade on a page, and upserts each mapped
    /// record keyed on its order number. Per-record problems (unmappable trades, repository
    /// failures) are collected in the result's failure list and never abort the run. A transport
    /// or protocol failure terminates the run early; everything synced up to that point stands
    /// and the abort reason is reported in the result.
    ///
    /// The only hard failure is an invalid window or page size, raised before any network call.
    /// Re-running with an overlapping window converges: a re-observed trade updates its existing
    /// order, it never duplicates it.
    pub async fn synchronize(&self, session: &str, params: SyncParams) -> Result<SyncResult, SyncApiError> {
        if params.days == 0 {
            return Err(SyncApiError::InvalidWindow("window must cover at least one day".to_string()));
        }
        if params.page_size == 0 {
            return Err(SyncApiError::InvalidWindow("page size must be greater than zero".to_string()));
        }
        let window_end = Utc::now();
        let window_start = window_end - Duration::days(i64::from(params.days));
        info!("🔄️📦️ Starting trade sync. Window: {window_start} - {window_end}");
        let mut result = SyncResult::new(window_start, window_end);
        let mut page_no = 1u32;
        loop {
            let page = match self
                .source
                .fetch_orders_page(session, window_start, window_end, page_no, params.page_size)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    error!("🔄️📦️ Could not fetch trade page {page_no}: {e}. Terminating this run.");
                    result.aborted = Some(e.to_string());
                    break;
                },
            };
            let (trades, has_next) = match page {
                TradePage::Exhausted => {
                    debug!("🔄️📦️ No more trades to sync");
                    break;
                },
                TradePage::Page { trades, has_next } => (trades, has_next),
            };
            result.pages += 1;
            for trade in &trades {
                let mapped = match map_trade(trade) {
                    Ok(mapped) => mapped,
                    Err(e) => {
                        warn!("🔄️📦️ Skipping trade {:?}: {e}", trade.tid);
                        result.record_failure(trade.tid.clone(), e.to_string());
                        continue;
                    },
                };
                match self.upsert_order(mapped).await {
                    Ok(order) => {
                        trace!("🔄️📦️ Order {} reconciled", order.order_number);
                        result.synced += 1;
                    },
                    Err(e) => {
                        warn!("🔄️📦️ Could not store trade {:?}: {e}", trade.tid);
                        result.record_failure(trade.tid.clone(), e.to_string());
                    },
                }
            }
            debug!("🔄️📦️ Synced {} trades so far. Page: {page_no}. More pages: {has_next}", result.synced);
            if !has_next {
                break;
            }
            page_no += 1;
        }
        info!(
            "🔄️📦️ Trade sync complete. {} trades synced over {} pages. {} failures.",
            result.synced,
            result.pages,
            result.failures.len()
        );
        Ok(result)
    }

    /// Applies one mapped trade: update if the order number exists, create otherwise. A
    /// duplicate-key conflict on create means we lost an insert race against a concurrent run for
    /// the same trade, so the record is retried once as an update instead of failing.
    async fn upsert_order(&self, mapped: MappedTrade) -> Result<Order, OrderDatabaseError> {
        let MappedTrade { order_number, update } = mapped;
        if self.db.fetch_order_by_number(&order_number).await?.is_some() {
            return self.db.update_order(&order_number, update).await;
        }
        let new_order = NewOrder::from_update(order_number.clone(), &update);
        match self.db.insert_order(new_order).await {
            Err(OrderDatabaseError::DuplicateOrderNumber(_)) => {
                debug!("🔄️📦️ Lost an insert race for order {order_number}. Applying as an update.");
                self.db.update_order(&order_number, update).await
            },
            other => other,
        }
    }
}
