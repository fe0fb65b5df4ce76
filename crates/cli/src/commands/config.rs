use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crmsuite_core::config::{AppConfig, LoadOptions, DATABASE_NAME_ENV, DATABASE_URL_ENV, PORT_ENV};
use toml::Value;

struct ConfigSources {
    path: Option<PathBuf>,
    document: Option<Value>,
}

impl ConfigSources {
    fn detect() -> Self {
        let path = detect_config_path();
        let document = load_config_file_doc(path.as_deref());
        Self { path, document }
    }

    fn line(&self, key_path: &str, value: &str, env_keys: &[&str]) -> String {
        format!("- {key_path} = {value} (source: {})", self.source(key_path, env_keys))
    }

    fn source(&self, key_path: &str, env_keys: &[&str]) -> String {
        if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.document {
            if contains_path(doc, key_path) {
                let file_path = self
                    .path
                    .as_deref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };
    let sources = ConfigSources::detect();
    let database = &config.database;

    let url = database.url_value().map(redact_url).unwrap_or_else(|| "<unset>".to_string());
    let name = match &database.name {
        Some(name) => name.clone(),
        None => format!("{} (fallback)", database.store_name()),
    };

    [
        "effective config (source precedence: env > file > default):".to_string(),
        sources.line(
            "database.backend",
            &format!("{:?}", database.backend),
            &["CRMSUITE_DATABASE_BACKEND"],
        ),
        sources.line("database.url", &url, &[DATABASE_URL_ENV]),
        sources.line("database.name", &name, &[DATABASE_NAME_ENV]),
        sources.line(
            "database.max_connections",
            &database.max_connections.to_string(),
            &["CRMSUITE_DATABASE_MAX_CONNECTIONS"],
        ),
        sources.line(
            "database.timeout_secs",
            &database.timeout_secs.to_string(),
            &["CRMSUITE_DATABASE_TIMEOUT_SECS"],
        ),
        sources.line(
            "server.bind_address",
            &config.server.bind_address,
            &["CRMSUITE_SERVER_BIND_ADDRESS"],
        ),
        sources.line("server.port", &config.server.port.to_string(), &[PORT_ENV]),
        sources.line(
            "logging.level",
            &config.logging.level,
            &["CRMSUITE_LOGGING_LEVEL", "CRMSUITE_LOG_LEVEL"],
        ),
        sources.line(
            "logging.format",
            &format!("{:?}", config.logging.format),
            &["CRMSUITE_LOGGING_FORMAT", "CRMSUITE_LOG_FORMAT"],
        ),
    ]
    .join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("crmsuite.toml"), PathBuf::from("config/crmsuite.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

/// Keep only the URL scheme.
fn redact_url(url: &str) -> String {
    match url.trim().split_once(':') {
        Some((scheme, _)) if !scheme.is_empty() => format!("{scheme}:<redacted>"),
        _ => "<redacted>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::redact_url;

    #[test]
    fn url_redaction_keeps_scheme_only() {
        assert_eq!(redact_url("sqlite:///var/lib/crm/secret.db"), "sqlite:<redacted>");
        assert_eq!(redact_url(":memory:"), "<redacted>");
        assert_eq!(redact_url("no-scheme"), "<redacted>");
    }
}
