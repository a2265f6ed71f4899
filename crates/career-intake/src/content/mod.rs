//! Read-only client for the headless content store.
//!
//! The site consumes one fixed "global" resource (header navigation, footer,
//! SEO strings). The store is a soft dependency: any transport, status, or
//! decode failure degrades to the built-in defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ContentConfig;

/// Fixed resource key for site-wide content.
const GLOBAL_RESOURCE: &str = "global";

/// Site-wide content served to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalContent {
    pub header: HeaderContent,
    pub footer: FooterContent,
    pub seo: SeoContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderContent {
    pub nav_items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterContent {
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoContent {
    pub title: String,
    pub description: String,
}

impl Default for HeaderContent {
    fn default() -> Self {
        let nav = |label: &str, href: &str| NavItem {
            label: label.to_string(),
            href: href.to_string(),
        };
        Self {
            nav_items: vec![
                nav("Work", "/work"),
                nav("Services", "/services"),
                nav("Career", "/career"),
                nav("Contact", "/contact"),
            ],
        }
    }
}

impl Default for FooterContent {
    fn default() -> Self {
        Self {
            tagline: "A digital product studio crafting web experiences.".to_string(),
        }
    }
}

impl Default for SeoContent {
    fn default() -> Self {
        Self {
            title: "Digital Product Studio".to_string(),
            description: "Strategy, design, and engineering for web products.".to_string(),
        }
    }
}

/// Response envelope used by the content store.
#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<GlobalContent>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content store responded with status {status}")]
    Status { status: u16 },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub struct ContentClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ContentClient {
    pub fn new(config: &ContentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            client,
        })
    }

    /// Store-style populate query: `populate[0]=a&populate[1]=b`.
    pub fn populate_query(fields: &[&str]) -> String {
        fields
            .iter()
            .enumerate()
            .map(|(index, field)| format!("populate[{index}]={field}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Fetch the global resource, degrading to defaults when the store is
    /// unavailable or returns nothing usable.
    pub async fn global(&self) -> GlobalContent {
        match self.fetch_global().await {
            Ok(Some(content)) => content,
            Ok(None) => {
                warn!("content store returned no global resource; using built-in defaults");
                GlobalContent::default()
            }
            Err(err) => {
                warn!(error = %err, "content store unavailable; using built-in defaults");
                GlobalContent::default()
            }
        }
    }

    async fn fetch_global(&self) -> Result<Option<GlobalContent>, ContentError> {
        let url = format!(
            "{}/api/{}?{}",
            self.base_url,
            GLOBAL_RESOURCE,
            Self::populate_query(&["header", "footer", "seo"])
        );

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ContentError::Status {
                status: status.as_u16(),
            });
        }

        let envelope = response.json::<Envelope>().await?;
        Ok(envelope.data)
    }
}
