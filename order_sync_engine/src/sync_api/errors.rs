use thiserror::Error;

/// The only hard failure [`super::OrderSyncApi::synchronize`] can return. Everything that goes
/// wrong after argument validation is reported inside the [`super::SyncResult`] instead.
#[derive(Debug, Clone, Error)]
pub enum SyncApiError {
    #[error("Invalid synchronization window: {0}")]
    InvalidWindow(String),
}
