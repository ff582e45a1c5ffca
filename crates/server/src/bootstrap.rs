use std::sync::Arc;

use souq_agent::{HttpBackend, IntentResolver};
use souq_core::config::{AppConfig, ConfigError, LoadOptions};
use thiserror::Error;

use crate::chat::ChatState;

pub struct Application {
    pub config: AppConfig,
    pub chat_state: ChatState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// Logging is initialized by the caller once the config is known, so this
// stays silent and reports through its error type only.
pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;

    let backend = Arc::new(HttpBackend::new(config.backend.base_url.clone()));
    let resolver =
        Arc::new(IntentResolver::new(backend.clone(), config.frontend.base_url.clone()));

    let chat_state = ChatState { resolver, backend };
    Ok(Application { config, chat_state })
}

#[cfg(test)]
mod tests {
    use souq_core::config::{ConfigOverrides, LoadOptions};

    use crate::bootstrap::bootstrap;

    #[test]
    fn bootstrap_fails_fast_on_invalid_backend_origin() {
        let result = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                backend_base_url: Some("ftp://backend.example".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        });

        assert!(result.is_err());
        let message = result.err().expect("error").to_string();
        assert!(message.contains("backend.base_url"));
    }

    #[test]
    fn bootstrap_succeeds_with_default_configuration() {
        let app = bootstrap(LoadOptions::default()).expect("defaults should bootstrap");
        assert_eq!(app.config.backend.base_url, "http://localhost:3000");
    }
}
