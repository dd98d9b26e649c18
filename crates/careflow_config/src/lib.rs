use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the layered application configuration.
///
/// Sources, in order of increasing precedence:
/// 1. `config/default` at the workspace root (any format the `config` crate accepts)
/// 2. `config/{RUN_ENV}` (RUN_ENV defaults to "debug")
/// 3. Environment variables with the `CAREFLOW` prefix, `__` as separator
///    (e.g. `CAREFLOW_API__BASE_URL`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "CAREFLOW".to_string());

    let manifest_dir = PathBuf::from(
        env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string()),
    );
    let workspace_root = manifest_dir
        .ancestors()
        .nth(2) // go from crates/careflow_config to workspace root
        .unwrap_or(&manifest_dir)
        .to_path_buf();

    let default_path = workspace_root.join("config/default");
    let env_path = workspace_root.join(format!("config/{}", run_env));

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_str().unwrap_or("config/default")).required(false))
        .add_source(File::with_name(env_path.to_str().unwrap_or("config/debug")).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

/// Reads the CareFlow API key from the environment.
///
/// The key is a secret and is deliberately not part of [`AppConfig`].
pub fn api_key() -> Option<String> {
    ensure_dotenv_loaded();
    env::var("CAREFLOW_API_KEY").ok().filter(|k| !k.is_empty())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is loaded at most once per process. `DOTENV_OVERRIDE` selects an
/// alternative file; otherwise `.env` in the current directory is used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_deserializes_with_optional_fields_absent() {
        let json = r#"{
            "api": { "base_url": "http://localhost:8000" },
            "runner": { "patient_ref": "patient-001", "visit_type": "screening" }
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!(config.api.timeout_seconds.is_none());
        assert!(config.runner.default_date.is_none());
        assert!(config.runner.cancel_reason.is_none());
        assert!(config.runner.provider.is_none());
    }

    #[test]
    fn api_key_ignores_empty_value() {
        env::set_var("CAREFLOW_API_KEY", "");
        assert!(api_key().is_none());
        env::set_var("CAREFLOW_API_KEY", "demo-key");
        assert_eq!(api_key().as_deref(), Some("demo-key"));
        env::remove_var("CAREFLOW_API_KEY");
    }
}
