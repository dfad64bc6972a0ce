//! Remote object store: the three config calls of the Panorama XML API.
//!
//! Each call is independent. Nothing here links a `set` to the `delete`
//! that follows it.

use crate::domain::constants::REQUEST_TIMEOUT_SECS;
use crate::services::config::Config;
use crate::services::entry::{parse_document, Element};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("api rejected {action}: {message}")]
    Rejected { action: String, message: String },
}

pub trait ObjectStore {
    /// Raw response body for `xpath`. Absence of the object is not an error.
    fn get(&self, xpath: &str) -> Result<String, StoreError>;
    /// Merge `element` (an `<entry>`) into the node at `container_xpath`.
    fn set(&self, container_xpath: &str, element: &str) -> Result<String, StoreError>;
    fn delete(&self, xpath: &str) -> Result<String, StoreError>;
}

pub struct PanoramaClient {
    http: reqwest::blocking::Client,
    api_url: String,
    api_key: String,
}

impl PanoramaClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Management interfaces ship with self-signed certificates.
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            http,
            api_url: format!("{}/api/", config.base_url()),
            api_key: config.api_key.clone(),
        })
    }

    fn call(
        &self,
        method: reqwest::Method,
        params: &[(&str, &str)],
    ) -> Result<String, StoreError> {
        let resp = self
            .http
            .request(method, &self.api_url)
            .header("X-PAN-KEY", &self.api_key)
            .query(params)
            .send()?
            .error_for_status()?;
        Ok(resp.text()?)
    }

    fn mutate(&self, action: &str, params: &[(&str, &str)]) -> Result<String, StoreError> {
        let body = self.call(reqwest::Method::POST, params)?;
        match api_error(&body) {
            Some(message) => Err(StoreError::Rejected {
                action: action.to_string(),
                message,
            }),
            None => Ok(body),
        }
    }
}

impl ObjectStore for PanoramaClient {
    fn get(&self, xpath: &str) -> Result<String, StoreError> {
        tracing::debug!(xpath, "api get");
        self.call(
            reqwest::Method::GET,
            &[("type", "config"), ("action", "get"), ("xpath", xpath)],
        )
    }

    fn set(&self, container_xpath: &str, element: &str) -> Result<String, StoreError> {
        tracing::debug!(xpath = container_xpath, "api set");
        self.mutate(
            "set",
            &[
                ("type", "config"),
                ("action", "set"),
                ("xpath", container_xpath),
                ("element", element),
            ],
        )
    }

    fn delete(&self, xpath: &str) -> Result<String, StoreError> {
        tracing::debug!(xpath, "api delete");
        self.mutate(
            "delete",
            &[("type", "config"), ("action", "delete"), ("xpath", xpath)],
        )
    }
}

/// Message of a `<response status="error">` envelope, if the body is one.
pub fn api_error(body: &str) -> Option<String> {
    let root = parse_document(body)?;
    if root.name != "response" || root.attribute("status") != Some("error") {
        return None;
    }
    let mut parts = Vec::new();
    collect_text(&root, &mut parts);
    if parts.is_empty() {
        Some(format!(
            "status=error code={}",
            root.attribute("code").unwrap_or("?")
        ))
    } else {
        Some(parts.join(" "))
    }
}

fn collect_text(el: &Element, out: &mut Vec<String>) {
    let own = el.text();
    let own = own.trim();
    if !own.is_empty() {
        out.push(own.to_string());
    }
    for child in el.elements() {
        collect_text(child, out);
    }
}
