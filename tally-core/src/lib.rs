//! tally-core: expense record types, date/amount normalization and currency display

pub mod amount;
pub mod currency;
pub mod dates;
pub mod normalize;
pub mod record;

pub use amount::coerce_amount;
pub use currency::{CurrencyTable, Money};
pub use dates::{MonthKey, format_date, month_abbrev, parse_date, parse_stored_date, today_in};
pub use normalize::{normalize, normalize_row};
pub use record::{
    DEFAULT_CATEGORY, DEFAULT_PAYMENT_MODE, ExpenseRecord, LEDGER_HEADERS, NewExpense, RawRow,
    ValidationError,
};
