//! bkrldc-core: codecs for the central bank deposit-rate bulletin
//! (ROC calendar dates, Chinese magnitude amounts) and the shared error type.

pub mod date;
pub mod error;
pub mod magnitude;
pub mod text;

pub use date::{DEFAULT_SEPARATOR, extract_date_token, roc_to_gregorian};
pub use error::{BulletinError, Result};
pub use magnitude::decode_magnitude;
pub use text::{normalize_digits, normalize_line};
