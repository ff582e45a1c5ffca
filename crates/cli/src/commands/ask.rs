use std::sync::Arc;

use souq_agent::{HttpBackend, IntentResolver};
use souq_core::config::{AppConfig, LoadOptions};
use souq_core::Intent;

use crate::commands::CommandResult;

/// Resolve a single intent/message pair against the configured backend and
/// print the reply the chatbot would give.
pub fn run(intent: &str, message: &str, token: Option<&str>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult {
                exit_code: 2,
                output: format!("config validation failed: {error}"),
            };
        }
    };

    if Intent::parse(intent).is_none() {
        let known = Intent::ALL.map(|known| known.as_str()).join(", ");
        return CommandResult {
            exit_code: 1,
            output: format!("unhandled intent `{intent}` (known intents: {known})"),
        };
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult {
                exit_code: 2,
                output: format!("failed to initialize async runtime: {error}"),
            };
        }
    };

    let backend = Arc::new(HttpBackend::new(config.backend.base_url.clone()));
    let resolver = IntentResolver::new(backend, config.frontend.base_url.clone());
    let reply = runtime.block_on(resolver.resolve(intent, message, token));

    CommandResult { exit_code: 0, output: reply }
}
