//! Conversion tests
//!
//! - Default format fallback on either side
//! - First-match resolution and capability filtering
//! - Plugin loading order and failures

mod tests_plugins;
mod tests_scenarios;
