mod api;
mod config;
mod error;
mod helpers;

mod data_objects;

pub use api::TaobaoApi;
pub use config::TaobaoConfig;
pub use data_objects::{RemoteTrade, TradePage};
pub use error::TaobaoApiError;
pub use helpers::{sign_params, TAOBAO_TIMESTAMP_FORMAT};
