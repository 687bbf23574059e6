//! Input loading: CSV reading and date parsing.

mod dates;
mod loader;

pub use dates::parse_timestamp;
pub use loader::{load_registration_dates, read_registration_dates, RegistrationDates};
