// Library interface for the Murmur client (for testing purposes)
#[macro_use]
pub mod logging;

pub mod api;
pub mod app;
pub mod carousel;
pub mod store;
pub mod toast;
pub mod ui;
