// Source-specific parsing; every parser fails closed on an unexpected shape
pub mod gift_nifty;
pub mod mtf;
pub mod yahoo;

pub use gift_nifty::{parse_gift_nifty, GIFT_NIFTY_URL};
pub use mtf::{parse_mtf, MTF_URL};
pub use yahoo::{chart_url, parse_chart};
