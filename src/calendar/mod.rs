mod errors;
pub mod loader;
pub mod models;

pub use errors::CalendarError;
pub use loader::{load_calendar, parse_calendar, CalendarRecords};
pub use models::{CalendarMatch, CalendarMatchday, RawScore};
