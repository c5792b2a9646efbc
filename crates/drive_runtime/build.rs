use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

const BACKEND_URL_ENV: &str = "DRIVE_BACKEND_URL";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct DriveConfig {
    schema_version: u32,
    backend_url: String,
    api_prefix: String,
    upload_accept: String,
    auth_prefs_key: String,
    file_system_prefs_key: String,
    toast_timeout_ms: u32,
}

fn validate(config: &DriveConfig, origin: &str) {
    if config.schema_version != 1 {
        panic!(
            "config schema mismatch in {origin}: expected 1 found {}",
            config.schema_version
        );
    }
    if !(config.backend_url.starts_with("http://") || config.backend_url.starts_with("https://")) {
        panic!(
            "backend_url must be an http(s) origin, found `{}`",
            config.backend_url
        );
    }
    if !config.api_prefix.is_empty() && !config.api_prefix.starts_with('/') {
        panic!(
            "api_prefix must be empty or start with `/`, found `{}`",
            config.api_prefix
        );
    }
    if config.auth_prefs_key.trim().is_empty() || config.file_system_prefs_key.trim().is_empty() {
        panic!("persist keys in {origin} must not be empty");
    }
    if config.auth_prefs_key == config.file_system_prefs_key {
        panic!("auth_prefs_key and file_system_prefs_key in {origin} must differ");
    }
    if config.toast_timeout_ms == 0 {
        panic!("toast_timeout_ms in {origin} must be positive");
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("drive.config.toml");
    println!("cargo:rerun-if-changed={}", path.display());
    println!("cargo:rerun-if-env-changed={BACKEND_URL_ENV}");

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let mut config: DriveConfig = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));

    if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
        if !url.trim().is_empty() {
            config.backend_url = url.trim().to_string();
        }
    }
    validate(&config, &path.display().to_string());

    let generated = format!(
        "/// Backend origin.\n\
pub const BACKEND_URL: &str = {:?};\n\
/// Path prefix for API routes.\n\
pub const API_PREFIX: &str = {:?};\n\
/// `accept` attribute of the upload input.\n\
pub const UPLOAD_ACCEPT: &str = {:?};\n\
/// Storage key of the persisted auth slice.\n\
pub const AUTH_PREFS_KEY: &str = {:?};\n\
/// Storage key of the persisted file-system slice.\n\
pub const FILE_SYSTEM_PREFS_KEY: &str = {:?};\n\
/// Toast lifetime in milliseconds.\n\
pub const TOAST_TIMEOUT_MS: u64 = {};\n",
        config.backend_url.trim_end_matches('/'),
        config.api_prefix,
        config.upload_accept,
        config.auth_prefs_key,
        config.file_system_prefs_key,
        config.toast_timeout_ms,
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("drive_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
