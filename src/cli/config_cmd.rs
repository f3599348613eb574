//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::analysis::ModelSelector;
use crate::domain::config::{AppConfig, RequestTimeout};
use crate::domain::error::ConfigError;
use crate::infrastructure::inference::parse_endpoint;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::Unset { key } => handle_unset(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;
    let value = value.trim();
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    apply(&mut config, key, Some(value))?;
    store.save(&config).await?;

    let shown = if key == "api_key" {
        mask_api_key(value)
    } else {
        value.to_string()
    };
    presenter.success(&format!("{} = {}", key, shown));
    Ok(())
}

async fn handle_unset<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;
    apply(&mut config, key, None)?;
    store.save(&config).await?;

    presenter.success(&format!("{} unset", key));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    presenter.output(&display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Set (`Some`) or clear (`None`) one key. The value must already be validated.
fn apply(config: &mut AppConfig, key: &str, value: Option<&str>) -> Result<(), ConfigError> {
    let text = value.map(str::to_string);
    match key {
        "api_key" => config.api_key = text,
        "model" => config.model = text,
        "custom_endpoint" => config.custom_endpoint = text,
        "request_timeout" => config.request_timeout = text,
        "telemetry" => {
            config.telemetry = value
                .map(|v| parse_bool(v).map_err(|_| bool_error(key)))
                .transpose()?
        }
        _ => unreachable!(), // Already validated
    }
    Ok(())
}

/// Displayable value of one key; the API key is masked
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "api_key" => config.api_key.as_deref().map(mask_api_key),
        "model" => config.model.clone(),
        "custom_endpoint" => config.custom_endpoint.clone(),
        "telemetry" => config.telemetry.map(|b| b.to_string()),
        "request_timeout" => config.request_timeout.clone(),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "api_key" if value.is_empty() => {
            return Err(invalid("Value must not be empty".to_string()));
        }
        "model" => {
            value
                .parse::<ModelSelector>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        "custom_endpoint" => {
            parse_endpoint(value).map_err(invalid)?;
        }
        "telemetry" => {
            parse_bool(value).map_err(|_| bool_error(key))?;
        }
        "request_timeout" => {
            value
                .parse::<RequestTimeout>()
                .map_err(|e| invalid(e.to_string()))?;
        }
        _ => {}
    }
    Ok(())
}

fn bool_error(key: &str) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("NO"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn mask_api_key_long() {
        assert_eq!(mask_api_key("abcdefghijklmnop"), "abcd...mnop");
    }

    #[test]
    fn mask_api_key_short() {
        assert_eq!(mask_api_key("short"), "*****");
    }

    #[test]
    fn validate_model() {
        assert!(validate_config_value("model", "gemini-2.5-pro").is_ok());
        assert!(validate_config_value("model", "custom").is_ok());
        assert!(validate_config_value("model", "bad model").is_err());
    }

    #[test]
    fn validate_custom_endpoint() {
        assert!(validate_config_value("custom_endpoint", "https://example.com/generate").is_ok());
        assert!(validate_config_value("custom_endpoint", "example.com").is_err());
    }

    #[test]
    fn validate_timeout_and_telemetry() {
        assert!(validate_config_value("request_timeout", "90s").is_ok());
        assert!(validate_config_value("request_timeout", "soon").is_err());
        assert!(validate_config_value("telemetry", "yes").is_ok());
        assert!(validate_config_value("telemetry", "maybe").is_err());
    }

    #[test]
    fn validate_api_key_not_empty() {
        assert!(validate_config_value("api_key", "").is_err());
        assert!(validate_config_value("api_key", "AIza123").is_ok());
    }

    #[test]
    fn apply_sets_and_clears() {
        let mut config = AppConfig::empty();
        apply(&mut config, "telemetry", Some("yes")).unwrap();
        apply(&mut config, "model", Some("custom")).unwrap();
        assert_eq!(config.telemetry, Some(true));
        assert_eq!(config.model, Some("custom".to_string()));

        apply(&mut config, "model", None).unwrap();
        assert!(config.model.is_none());
    }

    #[test]
    fn display_value_masks_key() {
        let config = AppConfig {
            api_key: Some("AIzaSyExampleKey1234".to_string()),
            ..Default::default()
        };
        assert_eq!(display_value(&config, "api_key"), Some("AIza...1234".to_string()));
        assert_eq!(display_value(&config, "model"), None);
    }

    #[tokio::test]
    async fn set_is_saved_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "custom_endpoint".to_string(),
                value: " http://localhost:9000/generate ".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let saved = store.load().await.unwrap();
        assert_eq!(
            saved.custom_endpoint,
            Some("http://localhost:9000/generate".to_string())
        );
    }

    #[tokio::test]
    async fn set_unknown_key_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        let result = handle_config_command(
            ConfigAction::Set {
                key: "duration".to_string(),
                value: "30s".to_string(),
            },
            &store,
            &presenter,
        )
        .await;

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
        assert!(!store.exists());
    }
}
