pub mod bar_history;
pub mod feed;
pub mod quote;

pub use bar_history::{Bar, BarHistory, RawBarRow};
pub use feed::{HistorySource, MarketFeed};
pub use quote::{InstrumentQuote, MarketQuote};
