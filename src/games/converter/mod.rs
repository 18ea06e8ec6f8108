pub mod app;
pub mod conversion;
pub mod error;
pub mod flags;
pub mod history;
pub mod rates;

pub use app::{ConvertMsg, CurrencyConverter};
pub use error::ConvertError;
