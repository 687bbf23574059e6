//! Core data structures for monthly registration series.

mod forecast;
mod month;
mod monthly_series;

pub use forecast::Forecast;
pub use month::{YearMonth, MONTH_ABBREVIATIONS};
pub use monthly_series::MonthlySeries;
