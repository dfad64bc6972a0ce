use std::collections::HashMap;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Missing '{key}' in {path}")]
    MissingKey { key: &'static str, path: String },
}

/// Connection settings for the management API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub panorama_ip: String,
    pub api_key: String,
}

impl Config {
    /// `panorama_ip` may carry its own scheme (e.g. a test endpoint);
    /// otherwise HTTPS is assumed.
    pub fn base_url(&self) -> String {
        let host = self.panorama_ip.trim_end_matches('/');
        if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }
}

pub fn parse_config(raw: &str, path: &str) -> Result<Config, ConfigError> {
    let mut values: HashMap<&str, &str> = HashMap::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            values.insert(k.trim(), v.trim());
        }
    }

    let mut take = |key: &'static str| {
        values
            .remove(key)
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingKey {
                key,
                path: path.to_string(),
            })
    };
    Ok(Config {
        panorama_ip: take("panorama_ip")?,
        api_key: take("api_key")?,
    })
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: display.clone(),
        source,
    })?;
    parse_config(&raw, &display)
}
