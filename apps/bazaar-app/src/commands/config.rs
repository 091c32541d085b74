//! # Config Commands

use tracing::debug;

use crate::state::ConfigState;

/// Gets the resolved application configuration.
///
/// ## When Used
/// - App startup (API endpoints, locale)
/// - Currency formatting in the cart footer
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
