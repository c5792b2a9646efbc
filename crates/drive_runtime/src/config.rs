//! Build-time client configuration generated from `drive.config.toml`.

use drive_web::HttpConfig;

include!(concat!(env!("OUT_DIR"), "/drive_config_generated.rs"));

/// Backend location resolved from the build configuration.
pub fn http_config() -> HttpConfig {
    HttpConfig::new(BACKEND_URL, API_PREFIX)
}
