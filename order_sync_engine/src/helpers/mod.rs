pub mod trade_mapper;

pub use trade_mapper::{map_trade, MappedTrade, TradeMapError};
