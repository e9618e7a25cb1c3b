//! # Config Commands
//!
//! Command for retrieving application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (pickup location in the header)
/// - Currency formatting
/// - Tip preset buttons at checkout
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
