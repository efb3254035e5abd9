pub mod actions;
pub mod calendar_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use actions::ApiResponse;
pub use calendar_builders::CalendarBuilder;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
