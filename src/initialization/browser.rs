//! Browser initialization.

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::render::{ChromiumDriver, ChromiumOptions};

/// Launches the Chromium instance used for every rendered fetch of the run.
///
/// # Errors
///
/// Returns `InitializationError::BrowserError` if Chromium cannot be found or
/// fails to start.
pub async fn init_browser(
    config: &Config,
    user_agent: &str,
) -> Result<ChromiumDriver, InitializationError> {
    let options = ChromiumOptions {
        headless: config.headless,
        window_width: config.window_width,
        window_height: config.window_height,
        user_agent: user_agent.to_string(),
        executable: config.chrome_path.clone(),
    };
    ChromiumDriver::launch(&options)
        .await
        .map_err(|e| InitializationError::BrowserError(format!("{e:#}")))
}
